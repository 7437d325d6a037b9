use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TaskChanges, TaskFilter, TaskStore};
use crate::tasks::error::StoreError;
use crate::tasks::types::Task;

/// Process-local task collection. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::Query(format!("duplicate task id {}", task.id)));
        }
        tasks.push(task.clone());
        Ok(task)
    }

    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            changes.apply(task);
            task.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .iter()
            .position(|t| t.id == id)
            .map(|index| tasks.remove(index)))
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
