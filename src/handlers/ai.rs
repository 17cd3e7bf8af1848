// src/handlers/ai.rs

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::message::TemplateType,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessagePayload {
    pub customer_id: i32,
    pub message_type: TemplateType,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeQuery {
    pub filename: Option<String>,
}

// POST /api/ai/generate-message
#[utoipa::path(
    post,
    path = "/api/ai/generate-message",
    tag = "AI",
    request_body = GenerateMessagePayload,
    responses(
        (status = 200, description = "Mensagem personalizada gerada"),
        (status = 400, description = "Provedor não configurado"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_message(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<GenerateMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state
        .analysis_service
        .generate_message(payload.customer_id, payload.message_type)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "message": message }))))
}

// POST /api/transcribe
// Corpo cru com os bytes do áudio; devolve o texto transcrito.
pub async fn transcribe(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<TranscribeQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let filename = query.filename.unwrap_or_else(|| "audio.webm".to_string());

    let text = app_state
        .analysis_service
        .transcribe(body.to_vec(), &filename)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "text": text }))))
}
