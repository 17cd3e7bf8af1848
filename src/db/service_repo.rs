// src/db/service_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::service::Service};

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active<'e, E>(&self, executor: E) -> Result<Vec<Service>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(executor)
        .await?;
        Ok(services)
    }

    /// Nomes do catálogo ativo (entram no prompt da análise especialista).
    pub async fn list_active_names<'e, E>(&self, executor: E) -> Result<Vec<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM services WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(executor)
        .await?;
        Ok(names)
    }
}
