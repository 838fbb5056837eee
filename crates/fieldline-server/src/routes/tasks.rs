//! Task Routes - Structured task management
//!
//! HTTP handlers that delegate to TaskService for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use fieldline::{NewTask, Priority, TaskQuery, TaskStatus};

use super::{api_error, ApiError};
use crate::models::{CompleteTaskResponse, CreateTaskRequest, TaskListQuery, TaskResponse};
use crate::AppState;

const DEFAULT_TASK_LIMIT: usize = 50;

/// Create a task from structured fields
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid task fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let priority = payload
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?
        .unwrap_or_default();

    let task = NewTask::new(payload.title, payload.creator_id.unwrap_or(payload.assignee_id))
        .with_assignee(payload.assignee_id)
        .with_description(payload.description)
        .with_site(payload.site_id)
        .with_due_date(payload.due_date)
        .with_priority(priority);

    let saved = state.task_service.create(task).await.map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// List a user's tasks, newest first
#[utoipa::path(
    get,
    path = "/api/tasks/user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Assignee ID"),
        TaskListQuery
    ),
    responses(
        (status = 200, description = "Tasks assigned to the user", body = Vec<TaskResponse>),
        (status = 400, description = "Unknown status filter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tasks"
)]
pub async fn list_user_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(TaskStatus::from_loose)
        .transpose()
        .map_err(|word| (StatusCode::BAD_REQUEST, format!("Unknown status: {}", word)))?;

    let tasks = state
        .task_service
        .list_for_user(
            user_id,
            &TaskQuery {
                status,
                limit: Some(query.limit.unwrap_or(DEFAULT_TASK_LIMIT)),
            },
        )
        .await
        .map_err(api_error)?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Mark a task completed; external completion is mirrored best-effort
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task completed", body = CompleteTaskResponse),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tasks"
)]
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompleteTaskResponse>, ApiError> {
    let (task, outcome) = state.task_service.complete(id).await.map_err(api_error)?;

    Ok(Json(CompleteTaskResponse {
        task: task.into(),
        external_sync: outcome.map(|o| o.as_str().to_string()),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", post(create_task))
        .route("/api/tasks/user/:user_id", get(list_user_tasks))
        .route("/api/tasks/:id/complete", post(complete_task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;
    use crate::routes::test_support::{get as get_request, json_request, send, state};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_task() {
        let store = InMemoryStore::new();
        let app = router().with_state(state(&store));
        let assignee = Uuid::new_v4();

        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/api/tasks",
                json!({
                    "title": "Swap filters",
                    "assignee_id": assignee,
                    "due_date": "2025-03-10",
                    "priority": "high"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["priority"], "High");
        assert_eq!(body["status"], "To Do");
        assert_eq!(body["due_date"], "2025-03-10");
        assert_eq!(body["creator_id"], json!(assignee));
    }

    #[tokio::test]
    async fn test_create_task_rejects_bad_priority() {
        let store = InMemoryStore::new();
        let app = router().with_state(state(&store));

        let (status, _) = send(
            app,
            json_request(
                "POST",
                "/api/tasks",
                json!({ "title": "Swap filters", "assignee_id": Uuid::new_v4(), "priority": "urgent" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_list_user_tasks_with_filters() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        for title in ["One", "Two", "Three"] {
            store.seed_task(NewTask::new(title, user));
        }
        let app = router().with_state(state(&store));

        let (status, body) = send(
            app.clone(),
            get_request(&format!("/api/tasks/user/{}?status=todo&limit=2", user)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["title"], "Three");

        let (status, _) = send(
            app,
            get_request(&format!("/api/tasks/user/{}?status=someday", user)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_complete_task() {
        let store = InMemoryStore::new();
        let task = store.seed_task(NewTask::new("Fix pump 3", Uuid::new_v4()));
        let app = router().with_state(state(&store));

        let (status, body) = send(
            app.clone(),
            json_request("POST", &format!("/api/tasks/{}/complete", task.id), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"]["status"], "Completed");
        assert!(body["external_sync"].is_null());

        let (status, _) = send(
            app,
            json_request("POST", &format!("/api/tasks/{}/complete", Uuid::new_v4()), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
