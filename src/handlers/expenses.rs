// src/handlers/expenses.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::expense::Expense,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    pub customer_id: Option<i32>,
    pub proposal_id: Option<i32>,

    #[validate(length(min = 1, message = "required"))]
    pub title: String,

    pub description: Option<String>,
    pub amount: Decimal,
    pub category: Option<String>,
    pub expense_date: NaiveDate,
}

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Expenses",
    responses((status = 200, description = "Despesas por data decrescente", body = Vec<Expense>)),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state.expense_repo.list_all(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(expenses)))
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Expenses",
    request_body = CreateExpensePayload,
    responses((status = 201, description = "Despesa registrada", body = Expense)),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = app_state
        .expense_repo
        .insert(
            &app_state.db_pool,
            payload.customer_id,
            payload.proposal_id,
            &payload.title,
            payload.description.as_deref(),
            payload.amount,
            payload.category.as_deref(),
            payload.expense_date,
        )
        .await?;

    let expense = app_state
        .expense_repo
        .find_detail(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::RecordNotFound)?;

    Ok((StatusCode::CREATED, Json(expense)))
}
