// src/db/proposal_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::proposal::{Proposal, ProposalStatus},
};

const PROPOSAL_SELECT: &str = "\
    SELECT p.*, \
           c.first_name || ' ' || c.last_name AS customer_name, \
           c.company, \
           u.username AS user_name \
    FROM proposals p \
    LEFT JOIN customers c ON c.id = p.customer_id \
    LEFT JOIN users u ON u.id = p.user_id";

// Itens agregados como JSON para a listagem por cliente, no mesmo shape
// camelCase do resto da API.
const ITEMS_SUBQUERY: &str = "\
    (SELECT COALESCE(json_agg(json_build_object( \
        'id', pi.id, \
        'serviceName', s.name, \
        'description', pi.description, \
        'quantity', pi.quantity, \
        'unitPrice', pi.unit_price, \
        'totalPrice', pi.total_price \
     ) ORDER BY pi.id), '[]'::json) \
     FROM proposal_items pi \
     LEFT JOIN services s ON s.id = pi.service_id \
     WHERE pi.proposal_id = p.id) AS items";

#[derive(Clone)]
pub struct ProposalRepository {
    pool: PgPool,
}

impl ProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
        user_id: i32,
        title: &str,
        description: Option<&str>,
        total_amount: Decimal,
        valid_until: Option<NaiveDate>,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO proposals (customer_id, user_id, title, description, total_amount, valid_until) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(customer_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(total_amount)
        .bind(valid_until)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        proposal_id: i32,
        service_id: i32,
        description: Option<&str>,
        quantity: i32,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO proposal_items \
             (proposal_id, service_id, description, quantity, unit_price, total_price) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(proposal_id)
        .bind(service_id)
        .bind(description)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_price)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_detail<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Proposal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} WHERE p.id = $1", PROPOSAL_SELECT);
        let proposal = sqlx::query_as::<_, Proposal>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(proposal)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Proposal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} ORDER BY p.created_at DESC", PROPOSAL_SELECT);
        let proposals = sqlx::query_as::<_, Proposal>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(proposals)
    }

    /// Propostas de um cliente, com os itens agregados em JSON.
    pub async fn list_for_customer<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
    ) -> Result<Vec<Proposal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT p.*, \
                    c.first_name || ' ' || c.last_name AS customer_name, \
                    c.company, \
                    u.username AS user_name, \
                    {} \
             FROM proposals p \
             LEFT JOIN customers c ON c.id = p.customer_id \
             LEFT JOIN users u ON u.id = p.user_id \
             WHERE p.customer_id = $1 \
             ORDER BY p.created_at DESC",
            ITEMS_SUBQUERY
        );
        let proposals = sqlx::query_as::<_, Proposal>(&sql)
            .bind(customer_id)
            .fetch_all(executor)
            .await?;
        Ok(proposals)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i32,
        status: ProposalStatus,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE proposals SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(status)
                .bind(id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }

    /// Material para a análise especialista: título, valor e status.
    pub async fn list_summaries_for_customer<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
    ) -> Result<Vec<(String, Decimal, ProposalStatus)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, (String, Decimal, ProposalStatus)>(
            "SELECT title, total_amount, status FROM proposals \
             WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }
}
