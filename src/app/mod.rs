// IRLogView - app/mod.rs
//
// Application layer: the query service transports call into.
// Dependencies: core, platform::config.

pub mod service;
