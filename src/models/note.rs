// src/models/note.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Mapeia o CREATE TYPE note_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "note_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Phone,
    Meeting,
    Email,
    Whatsapp,
    General,
    Audio,
}

// Nota de interação, sempre lida com o nome do autor e, quando existir,
// os campos da anotação de IA (LEFT JOIN com ai_analysis).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i32,
    pub customer_id: i32,
    pub user_id: i32,

    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub note_type: NoteType,

    pub content: String,
    pub is_transcribed: bool,
    pub created_at: DateTime<Utc>,

    pub author_name: Option<String>,

    // Anotação 1:0..1, removida em cascata junto com a nota.
    pub sentiment: Option<String>,
    pub priority: Option<String>,
    pub suggestions: Option<String>,
    pub next_actions: Option<String>,
    pub confidence_score: Option<Decimal>,
}
