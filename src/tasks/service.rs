use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::error::TaskError;
use super::store::{parse_id, TaskChanges, TaskFilter, TaskStore};
use super::types::*;

/// Task/comment operations over an injected [`TaskStore`].
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.store
            .find(&TaskFilter::default())
            .await
            .map_err(TaskError::Read)
    }

    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, TaskError> {
        let task = request.into_task(Uuid::new_v4(), Utc::now())?;
        let task = self.store.insert(task).await.map_err(TaskError::Write)?;
        info!("Created task {} ({})", task.id, task.name);
        Ok(task)
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, TaskError> {
        let id = parse_id(id).map_err(TaskError::Read)?;
        self.store
            .find_by_id(id)
            .await
            .map_err(TaskError::Read)?
            .ok_or_else(TaskError::task_not_found)
    }

    pub async fn update_task(
        &self,
        id: &str,
        request: UpdateTaskRequest,
    ) -> Result<Task, TaskError> {
        let id = parse_id(id).map_err(TaskError::Write)?;
        if matches!(&request.name, Some(name) if name.trim().is_empty()) {
            return Err(TaskError::Validation("`name` must not be empty".to_string()));
        }

        let changes = TaskChanges {
            name: request.name,
            description: request.description,
            due_date: request.due_date,
            priority: request.priority,
            status: request.status,
            ..Default::default()
        };
        self.apply(id, changes).await
    }

    /// Sets status and/or priority. A field left out of the request keeps its
    /// stored value.
    pub async fn update_status(
        &self,
        id: &str,
        request: StatusUpdateRequest,
    ) -> Result<Task, TaskError> {
        let id = parse_id(id).map_err(TaskError::Write)?;
        if request.status.is_none() && request.priority.is_none() {
            return Err(TaskError::Validation(
                "`status` or `priority` is required".to_string(),
            ));
        }

        let changes = TaskChanges {
            status: request.status,
            priority: request.priority,
            ..Default::default()
        };
        self.apply(id, changes).await
    }

    /// Deleting an id that is already gone still succeeds.
    pub async fn delete_task(&self, id: &str) -> Result<(), TaskError> {
        let id = parse_id(id).map_err(TaskError::Write)?;
        match self.store.delete_by_id(id).await.map_err(TaskError::Write)? {
            Some(task) => info!("Deleted task {} with {} comments", id, task.comments.len()),
            None => debug!("Delete for unknown task {id} ignored"),
        }
        Ok(())
    }

    pub async fn list_comments(&self, id: &str) -> Result<Vec<Comment>, TaskError> {
        Ok(self.get_task(id).await?.comments)
    }

    /// Appends a comment and returns the whole task.
    pub async fn add_comment(
        &self,
        id: &str,
        request: CreateCommentRequest,
    ) -> Result<Task, TaskError> {
        let id = parse_id(id).map_err(TaskError::Write)?;
        self.store
            .find_by_id(id)
            .await
            .map_err(TaskError::Write)?
            .ok_or_else(TaskError::task_not_found)?;

        let comment = request.into_comment(Uuid::new_v4(), Utc::now())?;
        let comment_id = comment.id;

        let task = self
            .apply(
                id,
                TaskChanges {
                    push_comment: Some(comment),
                    ..Default::default()
                },
            )
            .await?;
        info!("Added comment {comment_id} to task {id}");
        Ok(task)
    }

    pub async fn delete_comment(&self, task_id: &str, comment_id: &str) -> Result<(), TaskError> {
        let task_id = parse_id(task_id).map_err(TaskError::Write)?;
        let task = self
            .store
            .find_by_id(task_id)
            .await
            .map_err(TaskError::Write)?
            .ok_or_else(TaskError::task_not_found)?;

        let comment_id = Uuid::parse_str(comment_id.trim())
            .ok()
            .filter(|cid| task.comments.iter().any(|c| c.id == *cid))
            .ok_or_else(TaskError::comment_not_found)?;

        self.apply(
            task_id,
            TaskChanges {
                pull_comment: Some(comment_id),
                ..Default::default()
            },
        )
        .await?;
        info!("Deleted comment {comment_id} from task {task_id}");
        Ok(())
    }

    pub async fn search_tasks(&self, query: SearchQuery) -> Result<Vec<Task>, TaskError> {
        let filter = TaskFilter {
            status: non_empty(query.status),
            priority: non_empty(query.priority),
            name_contains: non_empty(query.query),
            due_before: None,
        };
        self.find(filter).await
    }

    pub async fn filter_tasks(&self, query: FilterQuery) -> Result<Vec<Task>, TaskError> {
        let due_before = match non_empty(query.due_date) {
            Some(raw) => Some(parse_timestamp(&raw).ok_or_else(|| {
                TaskError::Validation(format!("`dueDate` is not a valid date: {raw}"))
            })?),
            None => None,
        };
        let filter = TaskFilter {
            status: non_empty(query.status),
            priority: non_empty(query.priority),
            name_contains: None,
            due_before,
        };
        self.find(filter).await
    }

    async fn find(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskError> {
        if filter.is_empty() {
            debug!("No search constraints given, listing all tasks");
        } else {
            debug!("Finding tasks with {filter:?}");
        }
        self.store.find(&filter).await.map_err(TaskError::Read)
    }

    async fn apply(&self, id: Uuid, changes: TaskChanges) -> Result<Task, TaskError> {
        self.store
            .update_by_id(id, changes)
            .await
            .map_err(TaskError::Write)?
            .ok_or_else(TaskError::task_not_found)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
