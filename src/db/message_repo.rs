// src/db/message_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::message::{MessageDirection, WhatsappMessage, WhatsappTemplate},
};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
        direction: MessageDirection,
        message: &str,
        status: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO whatsapp_messages (customer_id, direction, message, status, phone_number) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(customer_id)
        .bind(direction)
        .bind(message)
        .bind(status)
        .bind(phone_number)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    /// Histórico de conversa com um cliente, em ordem cronológica.
    pub async fn list_for_customer<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
    ) -> Result<Vec<WhatsappMessage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let messages = sqlx::query_as::<_, WhatsappMessage>(
            "SELECT * FROM whatsapp_messages WHERE customer_id = $1 ORDER BY created_at ASC",
        )
        .bind(customer_id)
        .fetch_all(executor)
        .await?;
        Ok(messages)
    }

    pub async fn list_active_templates<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<WhatsappTemplate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let templates = sqlx::query_as::<_, WhatsappTemplate>(
            "SELECT * FROM whatsapp_templates WHERE is_active = TRUE ORDER BY id",
        )
        .fetch_all(executor)
        .await?;
        Ok(templates)
    }
}
