// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::dashboard::{MonthlyCustomerEntry, TopCustomerEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn active_customers<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM customers WHERE status = 'active'",
        )
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Reuniões na janela de uma semana para trás e uma para frente.
    pub async fn weekly_meetings<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM meetings \
             WHERE start_date >= NOW() - INTERVAL '7 days' \
               AND start_date <= NOW() + INTERVAL '7 days'",
        )
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn recent_notes<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notes WHERE created_at >= NOW() - INTERVAL '7 days'",
        )
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn pending_tasks_for_user<'e, E>(
        &self,
        executor: E,
        user_id: i32,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE status = 'pending' AND user_id = $1",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Soma das propostas, opcionalmente filtrada por status.
    pub async fn proposals_total<'e, E>(
        &self,
        executor: E,
        status: Option<&str>,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = match status {
            Some(status) => {
                sqlx::query_scalar::<_, Decimal>(
                    "SELECT COALESCE(SUM(total_amount), 0) FROM proposals \
                     WHERE status = $1::proposal_status",
                )
                .bind(status)
                .fetch_one(executor)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, Decimal>(
                    "SELECT COALESCE(SUM(total_amount), 0) FROM proposals",
                )
                .fetch_one(executor)
                .await?
            }
        };
        Ok(total)
    }

    /// Clientes novos por mês nos últimos 6 meses.
    pub async fn monthly_customer_growth<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<MonthlyCustomerEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, MonthlyCustomerEntry>(
            "SELECT to_char(created_at, 'YYYY-MM') AS month, COUNT(*) AS count \
             FROM customers \
             WHERE created_at >= NOW() - INTERVAL '6 months' \
             GROUP BY to_char(created_at, 'YYYY-MM') \
             ORDER BY month",
        )
        .fetch_all(executor)
        .await?;
        Ok(entries)
    }

    /// Clientes com mais notas nos últimos 30 dias.
    pub async fn top_interacted_customers<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<TopCustomerEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, TopCustomerEntry>(
            "SELECT c.id, \
                    c.first_name || ' ' || c.last_name AS name, \
                    c.company, \
                    COUNT(n.id) AS note_count \
             FROM customers c \
             LEFT JOIN notes n ON n.customer_id = c.id \
             WHERE n.created_at >= NOW() - INTERVAL '30 days' \
             GROUP BY c.id \
             ORDER BY note_count DESC \
             LIMIT 5",
        )
        .fetch_all(executor)
        .await?;
        Ok(entries)
    }
}
