//! HTTP API for tasks and their comments, backed by a document store.

pub mod core;
pub mod main_module;
pub mod security;
pub mod tasks;

pub use main_module::{build_router, build_task_store, run_axum_server};
