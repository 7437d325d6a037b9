//! Types for the tasks module
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::error::TaskError;

pub const DEFAULT_PRIORITY: &str = "Low";
pub const DEFAULT_STATUS: &str = "To Do";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl CreateTaskRequest {
    /// Builds a stored task, filling every field the caller left out.
    pub fn into_task(self, id: Uuid, now: DateTime<Utc>) -> Result<Task, TaskError> {
        let name = required_text(self.name, "name")?;

        Ok(Task {
            id,
            name,
            description: self.description,
            due_date: self.due_date.unwrap_or(now),
            priority: self
                .priority
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            comments: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCommentRequest {
    pub text: Option<String>,
}

impl CreateCommentRequest {
    pub fn into_comment(self, id: Uuid, now: DateTime<Utc>) -> Result<Comment, TaskError> {
        Ok(Comment {
            id,
            text: required_text(self.text, "text")?,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

fn required_text(value: Option<String>, field: &str) -> Result<String, TaskError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(TaskError::Validation(format!("`{field}` must not be empty"))),
        None => Err(TaskError::Validation(format!("`{field}` is required"))),
    }
}

/// Accepts either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date,
/// which is read as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| {
        parse_timestamp(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{value}`")))
    })
    .transpose()
}
