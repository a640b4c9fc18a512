// OrderDesk - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus pure data crates (serde, regex, chrono).
// Must NOT depend on: app, platform, or any I/O directly.

pub mod dataset;
pub mod filter;
pub mod model;
pub mod summary;
pub mod view;
