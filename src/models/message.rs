// src/models/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

// Registro de mensagem de WhatsApp associada a um cliente. O status é a
// string reportada pelo provedor, gravada como veio.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappMessage {
    pub id: i32,
    pub customer_id: i32,
    pub direction: MessageDirection,
    pub message: String,
    pub status: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "template_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    FirstContact,
    ProposalResponse,
    ThankYou,
    FollowUp,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappTemplate {
    pub id: i32,
    pub name: String,
    pub template_type: TemplateType,
    pub content: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
