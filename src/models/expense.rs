// src/models/expense.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,

    // Vínculos opcionais; ficam nulos se o cliente/proposta for removido.
    pub customer_id: Option<i32>,
    pub proposal_id: Option<i32>,

    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub category: Option<String>,
    pub expense_date: NaiveDate,
    pub created_at: DateTime<Utc>,

    pub customer_name: Option<String>,
    pub proposal_title: Option<String>,
}
