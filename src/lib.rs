// OrderDesk - lib.rs
//
// Library entry point, exposing all non-CLI modules for integration
// testing and programmatic use.
//
// The CLI-specific `render` module lives in `main.rs` and is not part
// of the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
