// src/services/messaging_service.rs
//
// Registro de mensagens de WhatsApp. Saída: envio via provedor + gravação
// com o status reportado. Entrada: webhook público casando o número por
// sufixo de dígitos (ver common::phone).

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        phone::{digits_only, match_suffix, whatsapp_address},
    },
    config::{Providers, SharedProviders},
    db::{CustomerRepository, MessageRepository},
    integrations::twilio::TwilioMessage,
    models::message::{MessageDirection, WhatsappMessage, WhatsappTemplate},
};

#[derive(Clone)]
pub struct MessagingService {
    message_repo: MessageRepository,
    customer_repo: CustomerRepository,
    providers: SharedProviders,
    pool: PgPool,
}

impl MessagingService {
    pub fn new(
        message_repo: MessageRepository,
        customer_repo: CustomerRepository,
        providers: SharedProviders,
        pool: PgPool,
    ) -> Self {
        Self {
            message_repo,
            customer_repo,
            providers,
            pool,
        }
    }

    fn snapshot(&self) -> Arc<Providers> {
        self.providers
            .read()
            .expect("lock de provedores envenenado")
            .clone()
    }

    /// Envia uma mensagem para o telefone cadastrado do cliente e persiste o
    /// registro de saída. Sem telefone não há envio nem linha gravada.
    pub async fn send_to_customer(
        &self,
        customer_id: i32,
        message: &str,
    ) -> Result<TwilioMessage, AppError> {
        let snapshot = self.snapshot();
        let twilio = snapshot
            .twilio
            .as_ref()
            .ok_or(AppError::ProviderNotConfigured("WhatsApp"))?;

        let customer = self
            .customer_repo
            .find_by_id(&self.pool, customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        let stored_phone = customer.phone.as_deref().unwrap_or_default();
        let digits = digits_only(stored_phone);
        if digits.is_empty() {
            return Err(AppError::CustomerPhoneMissing);
        }

        // A falha do provedor derruba a request inteira; nada é gravado.
        let result = twilio
            .send_whatsapp(&whatsapp_address(&digits), message)
            .await?;

        self.message_repo
            .insert(
                &self.pool,
                customer_id,
                MessageDirection::Outbound,
                message,
                Some(&result.status),
                Some(stored_phone),
            )
            .await?;

        Ok(result)
    }

    /// Webhook de entrada: casa o remetente com um cliente por substring de
    /// dígitos (primeiro cliente encontrado leva). Sem correspondência, a
    /// mensagem é apenas logada e descartada.
    pub async fn record_inbound(
        &self,
        from_raw: &str,
        body: &str,
    ) -> Result<Option<i32>, AppError> {
        let digits = digits_only(from_raw);
        if digits.is_empty() || body.trim().is_empty() {
            tracing::warn!("Webhook ignorado: remetente ou corpo vazio ({:?})", from_raw);
            return Ok(None);
        }

        let suffix = match_suffix(&digits);
        let matched = self
            .customer_repo
            .find_first_by_phone_suffix(&self.pool, suffix)
            .await?;

        match matched {
            Some(customer_id) => {
                self.message_repo
                    .insert(
                        &self.pool,
                        customer_id,
                        MessageDirection::Inbound,
                        body,
                        Some("received"),
                        Some(&format!("+{}", digits)),
                    )
                    .await?;
                tracing::info!(
                    "📥 Mensagem de {} associada ao cliente {}",
                    from_raw,
                    customer_id
                );
                Ok(Some(customer_id))
            }
            None => {
                tracing::warn!(
                    "📥 Mensagem de {} sem cliente correspondente; descartada",
                    from_raw
                );
                Ok(None)
            }
        }
    }

    pub async fn history(&self, customer_id: i32) -> Result<Vec<WhatsappMessage>, AppError> {
        self.message_repo
            .list_for_customer(&self.pool, customer_id)
            .await
    }

    pub async fn list_templates(&self) -> Result<Vec<WhatsappTemplate>, AppError> {
        self.message_repo.list_active_templates(&self.pool).await
    }
}
