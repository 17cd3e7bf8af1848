// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Crescimento mensal de clientes (últimos 6 meses)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCustomerEntry {
    pub month: Option<String>, // YYYY-MM vindo do to_char
    pub count: i64,
}

// Clientes com mais interações nos últimos 30 dias
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomerEntry {
    pub id: i32,
    pub name: Option<String>,
    pub company: Option<String>,
    pub note_count: i64,
}

// Os cards do topo do painel
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_customers: i64,
    pub weekly_meetings: i64,
    pub recent_notes: i64,
    pub pending_tasks: i64,
    pub total_proposals: Decimal,
    pub won_proposals: Decimal,
    pub lost_proposals: Decimal,
    pub monthly_customers: Vec<MonthlyCustomerEntry>,
    pub top_customers: Vec<TopCustomerEntry>,
}
