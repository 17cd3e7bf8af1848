// src/db/settings_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::settings::SystemSetting};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<SystemSetting>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let settings =
            sqlx::query_as::<_, SystemSetting>("SELECT * FROM system_settings ORDER BY setting_key")
                .fetch_all(executor)
                .await?;
        Ok(settings)
    }

    // UPSERT (Insert or Update) de uma chave de configuração
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        key: &str,
        value: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO system_settings (setting_key, setting_value) \
             VALUES ($1, $2) \
             ON CONFLICT (setting_key) \
             DO UPDATE SET setting_value = EXCLUDED.setting_value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(executor)
        .await?;
        Ok(())
    }
}
