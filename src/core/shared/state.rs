use std::sync::Arc;

use crate::tasks::{TaskService, TaskStore};

/// Shared handler state. Holds no mutable data of its own; everything lives
/// in the task store.
#[derive(Clone)]
pub struct AppState {
    pub task_store: Arc<dyn TaskStore>,
    pub task_service: Arc<TaskService>,
}

impl AppState {
    pub fn new(task_store: Arc<dyn TaskStore>) -> Self {
        let task_service = Arc::new(TaskService::new(Arc::clone(&task_store)));
        Self {
            task_store,
            task_service,
        }
    }
}
