// src/handlers/tasks.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::task::{Task, TaskPriority, TaskStatus, TaskType},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub customer_id: i32,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Enviar proposta de SEO")]
    pub title: String,

    pub description: Option<String>,

    // Se omitidos: prioridade média, tipo manual.
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub task_type: Option<TaskType>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    pub status: TaskStatus,
}

// GET /api/tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "Tarefas do usuário, prioridade alta primeiro", body = Vec<Task>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.task_service.list_for_user(user.0.id).await?;

    Ok((StatusCode::OK, Json(tasks)))
}

// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = CreateTaskPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = Task)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let task = app_state
        .task_service
        .create_manual_task(
            payload.customer_id,
            user.0.id,
            &payload.title,
            payload.description.as_deref(),
            payload.priority.unwrap_or(TaskPriority::Medium),
            payload.due_date,
            payload.task_type.unwrap_or(TaskType::Manual),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

// PUT /api/tasks/{id}
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    request_body = UpdateTaskPayload,
    params(("id" = i32, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Status atualizado", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_service.update_status(id, payload.status).await?;

    Ok((StatusCode::OK, Json(task)))
}
