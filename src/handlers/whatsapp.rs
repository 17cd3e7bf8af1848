// src/handlers/whatsapp.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::message::{WhatsappMessage, WhatsappTemplate},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub customer_id: i32,

    #[validate(length(min = 1, message = "required"))]
    pub message: String,
}

// Corpo form-urlencoded que a Twilio envia no webhook.
// Os nomes dos campos são os do provedor (From/Body).
#[derive(Debug, Deserialize)]
pub struct InboundWebhookPayload {
    #[serde(rename = "From", default)]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

// GET /api/whatsapp/templates
#[utoipa::path(
    get,
    path = "/api/whatsapp/templates",
    tag = "WhatsApp",
    responses(
        (status = 200, description = "Templates ativos", body = Vec<WhatsappTemplate>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_templates(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let templates = app_state.messaging_service.list_templates().await?;

    Ok((StatusCode::OK, Json(templates)))
}

// GET /api/whatsapp/messages/{customerId}
#[utoipa::path(
    get,
    path = "/api/whatsapp/messages/{customerId}",
    tag = "WhatsApp",
    params(("customerId" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Histórico de conversa", body = Vec<WhatsappMessage>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.messaging_service.history(customer_id).await?;

    Ok((StatusCode::OK, Json(messages)))
}

// POST /api/whatsapp/send
#[utoipa::path(
    post,
    path = "/api/whatsapp/send",
    tag = "WhatsApp",
    request_body = SendMessagePayload,
    responses(
        (status = 200, description = "Mensagem enviada e registrada"),
        (status = 400, description = "Integração ausente ou cliente sem telefone"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = app_state
        .messaging_service
        .send_to_customer(payload.customer_id, &payload.message)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "messageId": result.sid })),
    ))
}

// POST /api/whatsapp/webhook (rota pública, chamada pelo provedor)
// Sempre responde 200: mensagem sem cliente correspondente é descartada,
// e o provedor não deve ficar reenviando.
pub async fn inbound_webhook(
    State(app_state): State<AppState>,
    Form(payload): Form<InboundWebhookPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .messaging_service
        .record_inbound(&payload.from, &payload.body)
        .await?;

    Ok((StatusCode::OK, "OK"))
}
