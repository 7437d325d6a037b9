use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error::TaskError;
use super::types::*;
use crate::core::shared::state::AppState;

pub async fn handle_task_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Task>>, TaskError> {
    let tasks = state.task_service.list_tasks().await?;
    Ok(Json(tasks))
}

pub async fn handle_task_create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    let Json(request) = payload?;
    let task = state.task_service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn handle_task_search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, TaskError> {
    let Query(query) = query?;
    let tasks = state.task_service.search_tasks(query).await?;
    Ok(Json(tasks))
}

pub async fn handle_task_filter(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, TaskError> {
    let Query(query) = query?;
    let tasks = state.task_service.filter_tasks(query).await?;
    Ok(Json(tasks))
}

pub async fn handle_task_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, TaskError> {
    let task = state.task_service.get_task(&id).await?;
    Ok(Json(task))
}

pub async fn handle_task_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, TaskError> {
    let Json(request) = payload?;
    let task = state.task_service.update_task(&id, request).await?;
    Ok(Json(task))
}

pub async fn handle_task_status_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<Task>, TaskError> {
    let Json(request) = payload?;
    let task = state.task_service.update_status(&id, request).await?;
    Ok(Json(task))
}

pub async fn handle_task_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, TaskError> {
    state.task_service.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_comment_list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, TaskError> {
    let comments = state.task_service.list_comments(&id).await?;
    Ok(Json(comments))
}

pub async fn handle_comment_create(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    let Json(request) = payload?;
    let task = state.task_service.add_comment(&id, request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn handle_comment_delete(
    State(state): State<Arc<AppState>>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<StatusCode, TaskError> {
    state.task_service.delete_comment(&id, &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
