// IRLogView - lib.rs
//
// Library entry point. The query service and everything beneath it live here
// so that any transport (the bundled CLI, or an HTTP front end) and the
// integration tests share one implementation.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
