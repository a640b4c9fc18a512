// OrderDesk - app/mod.rs
//
// Application orchestration layer: file I/O for views and datasets,
// query construction and execution. Sits between the CLI surface and
// the pure core.

pub mod dataset_mgr;
pub mod query;
pub mod view_mgr;
