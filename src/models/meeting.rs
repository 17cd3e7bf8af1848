// src/models/meeting.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "meeting_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: i32,
    pub customer_id: i32,
    pub user_id: i32,

    pub title: String,
    pub description: Option<String>,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    pub status: MeetingStatus,
    pub notification_sent: bool,
    pub created_at: DateTime<Utc>,

    pub customer_name: Option<String>,
    pub company: Option<String>,
    pub user_name: Option<String>,
}
