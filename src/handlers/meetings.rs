// src/handlers/meetings.rs

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
    models::meeting::{Meeting, MeetingStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingPayload {
    pub customer_id: i32,

    #[validate(length(min = 1, message = "required"))]
    pub title: String,

    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetingPayload {
    pub status: MeetingStatus,
}

// GET /api/meetings
#[utoipa::path(
    get,
    path = "/api/meetings",
    tag = "Meetings",
    responses((status = 200, description = "Agenda completa", body = Vec<Meeting>)),
    security(("api_jwt" = []))
)]
pub async fn list_meetings(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let meetings = app_state.meeting_repo.list_all(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(meetings)))
}

// POST /api/meetings
#[utoipa::path(
    post,
    path = "/api/meetings",
    tag = "Meetings",
    request_body = CreateMeetingPayload,
    responses((status = 201, description = "Reunião agendada", body = Meeting)),
    security(("api_jwt" = []))
)]
pub async fn create_meeting(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateMeetingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = app_state
        .meeting_repo
        .insert(
            &app_state.db_pool,
            payload.customer_id,
            user.0.id,
            &payload.title,
            payload.description.as_deref(),
            payload.start_date,
            payload.end_date,
        )
        .await?;

    let meeting = app_state
        .meeting_repo
        .find_detail(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::RecordNotFound)?;

    Ok((StatusCode::CREATED, Json(meeting)))
}

// PUT /api/meetings/{id}
pub async fn update_meeting(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMeetingPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .meeting_repo
        .update_status(&app_state.db_pool, id, payload.status)
        .await?;

    let meeting = app_state
        .meeting_repo
        .find_detail(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::RecordNotFound)?;

    Ok((StatusCode::OK, Json(meeting)))
}
