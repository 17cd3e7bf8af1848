// src/db/meeting_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::meeting::{Meeting, MeetingStatus},
};

const MEETING_SELECT: &str = "\
    SELECT m.*, \
           c.first_name || ' ' || c.last_name AS customer_name, \
           c.company, \
           u.username AS user_name \
    FROM meetings m \
    LEFT JOIN customers c ON c.id = m.customer_id \
    LEFT JOIN users u ON u.id = m.user_id";

#[derive(Clone)]
pub struct MeetingRepository {
    pool: PgPool,
}

impl MeetingRepository {
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
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO meetings (customer_id, user_id, title, description, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(customer_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn find_detail<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Meeting>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} WHERE m.id = $1", MEETING_SELECT);
        let meeting = sqlx::query_as::<_, Meeting>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(meeting)
    }

    /// Agenda completa, da reunião mais próxima para a mais distante.
    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Meeting>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} ORDER BY m.start_date ASC", MEETING_SELECT);
        let meetings = sqlx::query_as::<_, Meeting>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(meetings)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i32,
        status: MeetingStatus,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE meetings SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Material para a análise especialista: título, descrição e status.
    pub async fn list_summaries_for_customer<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
    ) -> Result<Vec<(String, Option<String>, MeetingStatus)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, (String, Option<String>, MeetingStatus)>(
            "SELECT title, description, status FROM meetings \
             WHERE customer_id = $1 ORDER BY start_date DESC",
        )
        .bind(customer_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }
}
