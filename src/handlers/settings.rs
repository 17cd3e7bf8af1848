// src/handlers/settings.rs

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

// GET /api/settings
pub async fn get_settings(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_service.get_map().await?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
// Grava as chaves recebidas e recarrega o snapshot de provedores.
pub async fn update_settings(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    app_state.settings_service.update_many(payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Configurações atualizadas com sucesso" })),
    ))
}

// POST /api/test/openai
// Recarrega as configurações e faz uma chamada mínima para validar a chave.
pub async fn test_openai(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    app_state.settings_service.reload().await?;

    let snapshot = app_state.current_providers();
    let openai = snapshot
        .openai
        .as_ref()
        .ok_or(AppError::ProviderNotConfigured("OpenAI"))?;

    let response = openai
        .chat("Você é um assistente.", "Olá, mensagem de teste", 10)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "API da OpenAI funcionando",
            "response": response,
        })),
    ))
}
