// src/config.rs

use std::{
    collections::HashMap,
    env,
    sync::{Arc, RwLock},
    time::Duration,
};

use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        CustomerRepository, DashboardRepository, ExpenseRepository, MeetingRepository,
        MessageRepository, NoteRepository, ProposalRepository, ServiceRepository,
        SettingsRepository, TaskRepository, UserRepository,
    },
    integrations::{openai::OpenAiClient, twilio::TwilioClient},
    services::{
        analysis_service::AnalysisService, auth::AuthService, customer_service::CustomerService,
        dashboard_service::DashboardService, messaging_service::MessagingService,
        note_service::NoteService, settings_service::SettingsService, task_service::TaskService,
    },
};

// =============================================================================
//  SNAPSHOT DE PROVEDORES
// =============================================================================
// O estado é um snapshot imutável: `reload()` monta um `Providers` novo e
// troca o Arc inteiro; cada request enxerga uma foto consistente.

/// Valores crus de configuração: linha do banco vence, variável de ambiente
/// é o fallback, vazio conta como ausente.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub openai_api_key: Option<String>,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_whatsapp_number: Option<String>,
    pub language: String,
    pub annotation_confidence: Decimal,
}

impl ProviderSettings {
    pub fn from_sources<F>(db: &HashMap<String, String>, env_lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str| -> Option<String> {
            db.get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .or_else(|| env_lookup(&key.to_uppercase()).filter(|v| !v.trim().is_empty()))
                .map(|v| v.trim().to_string())
        };

        // Constante configurável; o provedor não calcula confiança de verdade.
        let annotation_confidence = env_lookup("ANNOTATION_CONFIDENCE")
            .and_then(|raw| raw.parse::<Decimal>().ok())
            .unwrap_or_else(default_confidence);

        Self {
            openai_api_key: pick("openai_api_key"),
            twilio_account_sid: pick("twilio_account_sid"),
            twilio_auth_token: pick("twilio_auth_token"),
            twilio_whatsapp_number: pick("twilio_whatsapp_number"),
            language: pick("language").unwrap_or_else(|| "pt".to_string()),
            annotation_confidence,
        }
    }
}

fn default_confidence() -> Decimal {
    Decimal::new(85, 2) // 0.85
}

/// Foto imutável dos clientes de integração. `None` = não configurado; os
/// caminhos best-effort pulam em silêncio, os primários devolvem erro 400.
pub struct Providers {
    pub openai: Option<OpenAiClient>,
    pub twilio: Option<TwilioClient>,
    pub language: String,
    pub annotation_confidence: Decimal,
}

impl Providers {
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let openai = settings
            .openai_api_key
            .as_ref()
            .map(|key| OpenAiClient::new(key.clone()));

        if openai.is_some() {
            tracing::info!("✅ OpenAI configurado");
        } else {
            tracing::warn!("⚠️ Chave da OpenAI ausente; análises desativadas");
        }

        let twilio = match (
            &settings.twilio_account_sid,
            &settings.twilio_auth_token,
            &settings.twilio_whatsapp_number,
        ) {
            (Some(sid), Some(token), Some(from)) => {
                tracing::info!("✅ Twilio configurado");
                Some(TwilioClient::new(sid.clone(), token.clone(), from.clone()))
            }
            _ => None,
        };

        Self {
            openai,
            twilio,
            language: settings.language.clone(),
            annotation_confidence: settings.annotation_confidence,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            openai: None,
            twilio: None,
            language: "pt".to_string(),
            annotation_confidence: default_confidence(),
        }
    }
}

pub type SharedProviders = Arc<RwLock<Arc<Providers>>>;

// =============================================================================
//  ESTADO DA APLICAÇÃO
// =============================================================================

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub providers: SharedProviders,

    pub auth_service: AuthService,
    pub customer_service: CustomerService,
    pub note_service: NoteService,
    pub analysis_service: AnalysisService,
    pub task_service: TaskService,
    pub messaging_service: MessagingService,
    pub settings_service: SettingsService,
    pub dashboard_service: DashboardService,

    // Áreas finas consultadas direto pelo handler
    pub service_repo: ServiceRepository,
    pub meeting_repo: MeetingRepository,
    pub proposal_repo: ProposalRepository,
    pub expense_repo: ExpenseRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Snapshot vazio até o primeiro reload (depois das migrações).
        let providers: SharedProviders = Arc::new(RwLock::new(Arc::new(Providers::unconfigured())));

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let note_repo = NoteRepository::new(db_pool.clone());
        let task_repo = TaskRepository::new(db_pool.clone());
        let message_repo = MessageRepository::new(db_pool.clone());
        let meeting_repo = MeetingRepository::new(db_pool.clone());
        let proposal_repo = ProposalRepository::new(db_pool.clone());
        let expense_repo = ExpenseRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let task_service = TaskService::new(task_repo.clone(), db_pool.clone());
        let analysis_service = AnalysisService::new(
            providers.clone(),
            customer_repo.clone(),
            note_repo.clone(),
            meeting_repo.clone(),
            proposal_repo.clone(),
            service_repo.clone(),
            task_service.clone(),
            db_pool.clone(),
        );
        let customer_service =
            CustomerService::new(customer_repo.clone(), db_pool.clone());
        let note_service = NoteService::new(
            note_repo.clone(),
            customer_repo.clone(),
            analysis_service.clone(),
            providers.clone(),
            db_pool.clone(),
        );
        let messaging_service = MessagingService::new(
            message_repo.clone(),
            customer_repo.clone(),
            providers.clone(),
            db_pool.clone(),
        );
        let settings_service =
            SettingsService::new(settings_repo.clone(), providers.clone(), db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            providers,
            auth_service,
            customer_service,
            note_service,
            analysis_service,
            task_service,
            messaging_service,
            settings_service,
            dashboard_service,
            service_repo,
            meeting_repo,
            proposal_repo,
            expense_repo,
        })
    }

    /// Foto atual dos provedores (Arc barato de clonar por request).
    pub fn current_providers(&self) -> Arc<Providers> {
        self.providers
            .read()
            .expect("lock de provedores envenenado")
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn db_setting_wins_over_env() {
        let mut db = HashMap::new();
        db.insert("openai_api_key".to_string(), "sk-db".to_string());

        let settings =
            ProviderSettings::from_sources(&db, |key| match key {
                "OPENAI_API_KEY" => Some("sk-env".to_string()),
                _ => None,
            });

        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-db"));
    }

    #[test]
    fn empty_db_value_falls_back_to_env() {
        let mut db = HashMap::new();
        db.insert("openai_api_key".to_string(), "   ".to_string());

        let settings = ProviderSettings::from_sources(&db, |key| match key {
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        });

        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn missing_everywhere_means_unconfigured() {
        let settings = ProviderSettings::from_sources(&HashMap::new(), no_env);
        assert!(settings.openai_api_key.is_none());
        assert!(settings.twilio_account_sid.is_none());

        let providers = Providers::from_settings(&settings);
        assert!(providers.openai.is_none());
        assert!(providers.twilio.is_none());
    }

    #[test]
    fn confidence_defaults_to_085_and_accepts_override() {
        let settings = ProviderSettings::from_sources(&HashMap::new(), no_env);
        assert_eq!(settings.annotation_confidence, Decimal::new(85, 2));

        let overridden = ProviderSettings::from_sources(&HashMap::new(), |key| {
            (key == "ANNOTATION_CONFIDENCE").then(|| "0.6".to_string())
        });
        assert_eq!(overridden.annotation_confidence, Decimal::new(6, 1));
    }

    #[test]
    fn twilio_requires_all_three_credentials() {
        let mut db = HashMap::new();
        db.insert("twilio_account_sid".to_string(), "AC123".to_string());
        db.insert("twilio_auth_token".to_string(), "token".to_string());

        let settings = ProviderSettings::from_sources(&db, no_env);
        let providers = Providers::from_settings(&settings);
        assert!(providers.twilio.is_none());

        db.insert(
            "twilio_whatsapp_number".to_string(),
            "+14155238886".to_string(),
        );
        let settings = ProviderSettings::from_sources(&db, no_env);
        let providers = Providers::from_settings(&settings);
        assert!(providers.twilio.is_some());
    }
}
