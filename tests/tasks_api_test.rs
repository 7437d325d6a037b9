#[cfg(test)]
mod tasks_api_integration_tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use taskboard::core::shared::state::AppState;
    use taskboard::tasks::MemoryTaskStore;
    use tower::ServiceExt;

    fn app() -> Router {
        taskboard::build_router(Arc::new(AppState::new(Arc::new(MemoryTaskStore::new()))))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_task_lifecycle_scenario() {
        let app = app();

        let (status, task) =
            call(&app, Method::POST, "/api/tasks", Some(json!({ "name": "Write docs" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task["status"], "To Do");
        assert_eq!(task["priority"], "Low");
        let id = task["id"].as_str().unwrap().to_string();

        let (status, updated) = call(
            &app,
            Method::PATCH,
            &format!("/api/tasks/{id}/status"),
            Some(json!({ "status": "Done" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "Done");
        assert_eq!(updated["priority"], "Low");

        let (status, with_comment) = call(
            &app,
            Method::POST,
            &format!("/api/tasks/{id}/comments"),
            Some(json!({ "text": "Reviewed" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(with_comment["id"], id.as_str());
        assert_eq!(with_comment["status"], "Done");

        let (status, listed) = call(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["comments"][0]["text"], "Reviewed");

        let (status, found) =
            call(&app, Method::GET, "/api/tasks/search?status=Done&query=DOCS", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found[0]["id"], id.as_str());

        let (status, _) = call(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = call(&app, Method::GET, &format!("/api/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Task not found" }));
    }

    #[tokio::test]
    async fn test_create_round_trip_keeps_submitted_fields() {
        let app = app();
        let (status, created) = call(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({
                "name": "Plan release",
                "description": "cut the branch",
                "dueDate": "2025-06-30T17:00:00Z",
                "priority": "High",
                "status": "In Progress"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, fetched) = call(
            &app,
            Method::GET,
            &format!("/api/tasks/{}", created["id"].as_str().unwrap()),
            None,
        )
        .await;
        assert_eq!(fetched["name"], "Plan release");
        assert_eq!(fetched["description"], "cut the branch");
        assert_eq!(fetched["dueDate"], "2025-06-30T17:00:00Z");
        assert_eq!(fetched["priority"], "High");
        assert_eq!(fetched["status"], "In Progress");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
