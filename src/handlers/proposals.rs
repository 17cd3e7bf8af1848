// src/handlers/proposals.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::proposal::{items_total, Proposal, ProposalItemInput, ProposalStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalPayload {
    pub customer_id: i32,

    #[validate(length(min = 1, message = "required"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub items: Vec<ProposalItemInput>,

    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProposalStatusPayload {
    pub status: ProposalStatus,
}

// GET /api/proposals
#[utoipa::path(
    get,
    path = "/api/proposals",
    tag = "Proposals",
    responses((status = 200, description = "Todas as propostas", body = Vec<Proposal>)),
    security(("api_jwt" = []))
)]
pub async fn list_proposals(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let proposals = app_state.proposal_repo.list_all(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(proposals)))
}

// GET /api/customers/{customerId}/proposals
#[utoipa::path(
    get,
    path = "/api/customers/{customerId}/proposals",
    tag = "Proposals",
    params(("customerId" = i32, Path, description = "ID do cliente")),
    responses((status = 200, description = "Propostas do cliente com itens", body = Vec<Proposal>)),
    security(("api_jwt" = []))
)]
pub async fn list_customer_proposals(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let proposals = app_state
        .proposal_repo
        .list_for_customer(&app_state.db_pool, customer_id)
        .await?;

    Ok((StatusCode::OK, Json(proposals)))
}

// POST /api/proposals
// O total é derivado dos itens; proposta e itens entram na mesma transação.
#[utoipa::path(
    post,
    path = "/api/proposals",
    tag = "Proposals",
    request_body = CreateProposalPayload,
    responses((status = 201, description = "Proposta criada", body = Proposal)),
    security(("api_jwt" = []))
)]
pub async fn create_proposal(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateProposalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let total_amount = items_total(&payload.items);

    let mut tx = app_state.db_pool.begin().await?;

    let proposal_id = app_state
        .proposal_repo
        .insert(
            &mut *tx,
            payload.customer_id,
            user.0.id,
            &payload.title,
            payload.description.as_deref(),
            total_amount,
            payload.valid_until,
        )
        .await?;

    for item in &payload.items {
        app_state
            .proposal_repo
            .insert_item(
                &mut *tx,
                proposal_id,
                item.service_id,
                item.description.as_deref(),
                item.quantity,
                item.unit_price,
                item.total_price(),
            )
            .await?;
    }

    tx.commit().await?;

    let proposal = app_state
        .proposal_repo
        .find_detail(&app_state.db_pool, proposal_id)
        .await?
        .ok_or(AppError::RecordNotFound)?;

    Ok((StatusCode::CREATED, Json(proposal)))
}

// PUT /api/proposals/{id}/status
pub async fn update_proposal_status(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProposalStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .proposal_repo
        .update_status(&app_state.db_pool, id, payload.status)
        .await?;

    let proposal = app_state
        .proposal_repo
        .find_detail(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::RecordNotFound)?;

    Ok((StatusCode::OK, Json(proposal)))
}
