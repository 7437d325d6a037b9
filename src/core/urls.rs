#[derive(Debug)]
pub struct ApiUrls;

impl ApiUrls {
    // Tasks - JSON APIs
    pub const TASKS: &'static str = "/api/tasks";
    pub const TASK_SEARCH: &'static str = "/api/tasks/search";
    pub const TASK_FILTER: &'static str = "/api/tasks/filter";
    pub const TASK_BY_ID: &'static str = "/api/tasks/{id}";
    pub const TASK_STATUS: &'static str = "/api/tasks/{id}/status";
    pub const TASK_COMMENTS: &'static str = "/api/tasks/{id}/comments";
    pub const TASK_COMMENT_BY_ID: &'static str = "/api/tasks/{id}/comments/{comment_id}";

    // Health
    pub const HEALTH: &'static str = "/api/health";
    pub const HEALTH_SIMPLE: &'static str = "/health";
}
