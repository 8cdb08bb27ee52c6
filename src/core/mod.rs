// IRLogView - core/mod.rs
//
// Core logic layer: decoding, classification, discovery and the data model.
// Must NOT depend on: app or the CLI.

pub mod catalog;
pub mod classifier;
pub mod decoder;
pub mod export;
pub mod filter;
pub mod model;
pub mod suspicious;
