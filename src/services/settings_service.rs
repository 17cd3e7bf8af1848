// src/services/settings_service.rs
//
// Configurações editáveis em runtime. Atualizar uma chave recarrega o
// snapshot de provedores: monta-se um `Providers` novo a partir de
// banco + ambiente e o Arc é trocado de uma vez.

use std::{collections::HashMap, env, sync::Arc};

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    config::{ProviderSettings, Providers, SharedProviders},
    db::SettingsRepository,
};

#[derive(Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
    providers: SharedProviders,
    pool: PgPool,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository, providers: SharedProviders, pool: PgPool) -> Self {
        Self {
            repo,
            providers,
            pool,
        }
    }

    /// Mapa chave -> valor para o painel de administração.
    pub async fn get_map(&self) -> Result<HashMap<String, String>, AppError> {
        let rows = self.repo.get_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.setting_key, row.setting_value.unwrap_or_default()))
            .collect())
    }

    /// Upsert de várias chaves e recarga do snapshot em seguida.
    pub async fn update_many(&self, entries: HashMap<String, String>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for (key, value) in &entries {
            self.repo.upsert(&mut *tx, key, value).await?;
        }
        tx.commit().await?;

        self.reload().await
    }

    /// Relê as configurações e deriva os clientes de provedor de novo.
    pub async fn reload(&self) -> Result<(), AppError> {
        let rows = self.repo.get_all(&self.pool).await?;
        let map: HashMap<String, String> = rows
            .into_iter()
            .map(|row| (row.setting_key, row.setting_value.unwrap_or_default()))
            .collect();

        let settings = ProviderSettings::from_sources(&map, |key| env::var(key).ok());
        let fresh = Providers::from_settings(&settings);

        *self
            .providers
            .write()
            .expect("lock de provedores envenenado") = Arc::new(fresh);

        tracing::info!("✅ Configurações recarregadas do banco");
        Ok(())
    }
}
