// src/handlers/notes.rs

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::note::{Note, NoteType},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Cliente pediu proposta de SEO com urgência")]
    pub content: String,

    // Se omitido, a nota entra como 'general'.
    #[serde(rename = "type")]
    pub note_type: Option<NoteType>,
}

#[derive(Debug, Deserialize)]
pub struct AudioNoteQuery {
    // Nome do arquivo original; a extensão orienta o decodificador do provedor.
    pub filename: Option<String>,
}

// GET /api/customers/{customerId}/notes
#[utoipa::path(
    get,
    path = "/api/customers/{customerId}/notes",
    tag = "Notes",
    params(("customerId" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Notas com autor e anotação de IA (se houver)", body = Vec<Note>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notes(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let notes = app_state.note_service.list_for_customer(customer_id).await?;

    Ok((StatusCode::OK, Json(notes)))
}

// POST /api/customers/{customerId}/notes
#[utoipa::path(
    post,
    path = "/api/customers/{customerId}/notes",
    tag = "Notes",
    request_body = CreateNotePayload,
    params(("customerId" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 201, description = "Nota criada (anotação de IA é best-effort)", body = Note),
        (status = 400, description = "Conteúdo vazio")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_note(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(customer_id): Path<i32>,
    Json(payload): Json<CreateNotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let note = app_state
        .note_service
        .add_note(
            customer_id,
            user.0.id,
            &payload.content,
            payload.note_type.unwrap_or(NoteType::General),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

// POST /api/customers/{customerId}/notes/audio
// Corpo cru com os bytes do áudio; transcrição obrigatória (sem provedor,
// a request falha inteira).
pub async fn create_audio_note(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(customer_id): Path<i32>,
    Query(query): Query<AudioNoteQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if body.is_empty() {
        return Err(AppError::ValidationError(empty_audio_error()));
    }

    let filename = query.filename.unwrap_or_else(|| "audio.webm".to_string());

    let note = app_state
        .note_service
        .add_audio_note(customer_id, user.0.id, body.to_vec(), &filename)
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

fn empty_audio_error() -> validator::ValidationErrors {
    let mut errors = validator::ValidationErrors::new();
    let mut error = validator::ValidationError::new("required");
    error.message = Some("Arquivo de áudio não enviado.".into());
    errors.add("audio", error);
    errors
}
