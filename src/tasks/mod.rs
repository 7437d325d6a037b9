pub mod error;
pub mod handlers;
pub mod service;
pub mod store;
pub mod types;

use axum::{
    routing::{delete, get, patch},
    Router,
};
use std::sync::Arc;

use crate::core::shared::state::AppState;
use crate::core::urls::ApiUrls;

pub use error::{StoreError, TaskError};
pub use handlers::*;
pub use service::TaskService;
pub use store::{MemoryTaskStore, PgTaskStore, TaskChanges, TaskFilter, TaskStore};
pub use types::*;

/// Configure task and comment routes.
///
/// `search` and `filter` are literal segments and go first so `{id}` never
/// claims them.
pub fn configure_task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(ApiUrls::TASK_SEARCH, get(handle_task_search))
        .route(ApiUrls::TASK_FILTER, get(handle_task_filter))
        .route(ApiUrls::TASKS, get(handle_task_list).post(handle_task_create))
        .route(
            ApiUrls::TASK_BY_ID,
            get(handle_task_get)
                .patch(handle_task_update)
                .delete(handle_task_delete),
        )
        .route(ApiUrls::TASK_STATUS, patch(handle_task_status_update))
        .route(
            ApiUrls::TASK_COMMENTS,
            get(handle_comment_list).post(handle_comment_create),
        )
        .route(ApiUrls::TASK_COMMENT_BY_ID, delete(handle_comment_delete))
}
