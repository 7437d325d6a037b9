//! Document collection interface the task service runs against.
//!
//! A store only knows how to insert, look up, patch and remove whole task
//! documents. Validation, defaults and status mapping stay in the service.

mod memory;
mod postgres;

pub use memory::MemoryTaskStore;
pub use postgres::PgTaskStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::StoreError;
use super::types::{Comment, Task};

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, task: Task) -> Result<Task, StoreError>;

    /// Every task matching `filter`, in insertion order.
    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Applies `changes` atomically and returns the post-update document,
    /// or `None` when no task has this id.
    async fn update_by_id(
        &self,
        id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError>;

    /// Removes the task and returns what was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn kind(&self) -> &'static str;
}

pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

/// Conjunctive filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Case-insensitive substring of `name`.
    pub name_contains: Option<String>,
    /// Inclusive upper bound on `due_date`.
    pub due_before: Option<DateTime<Utc>>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = &self.status {
            if &task.status != status {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if &task.priority != priority {
                return false;
            }
        }
        if let Some(needle) = &self.name_contains {
            if !task.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(due_before) = self.due_before {
            if task.due_date > due_before {
                return false;
            }
        }
        true
    }
}

/// Field-level update applied to one stored task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub push_comment: Option<Comment>,
    pub pull_comment: Option<Uuid>,
}

impl TaskChanges {
    pub fn apply(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(comment) = self.push_comment {
            task.comments.push(comment);
        }
        if let Some(comment_id) = self.pull_comment {
            task.comments.retain(|c| c.id != comment_id);
        }
    }
}
