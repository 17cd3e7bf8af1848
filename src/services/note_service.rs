// src/services/note_service.rs
//
// Registro de interações: toda nota criada marca o last_interaction do
// cliente (efeito incondicional, na mesma transação) e, quando o provedor
// de análise está disponível e o conteúdo passa do limiar, dispara a
// anotação de IA de forma síncrona mas best-effort.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    config::{Providers, SharedProviders},
    db::{CustomerRepository, NoteRepository},
    models::note::{Note, NoteType},
    services::analysis_service::{AnalysisService, ANNOTATION_MIN_CONTENT_LEN},
};

#[derive(Clone)]
pub struct NoteService {
    note_repo: NoteRepository,
    customer_repo: CustomerRepository,
    analysis: AnalysisService,
    providers: SharedProviders,
    pool: PgPool,
}

impl NoteService {
    pub fn new(
        note_repo: NoteRepository,
        customer_repo: CustomerRepository,
        analysis: AnalysisService,
        providers: SharedProviders,
        pool: PgPool,
    ) -> Self {
        Self {
            note_repo,
            customer_repo,
            analysis,
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

    pub async fn list_for_customer(&self, customer_id: i32) -> Result<Vec<Note>, AppError> {
        self.note_repo.list_for_customer(&self.pool, customer_id).await
    }

    /// Cria uma nota e devolve o registro hidratado (autor + anotação, se
    /// houver). A falha da anotação nunca derruba a criação da nota.
    pub async fn add_note(
        &self,
        customer_id: i32,
        user_id: i32,
        content: &str,
        note_type: NoteType,
    ) -> Result<Note, AppError> {
        let mut tx = self.pool.begin().await?;

        let note_id = self
            .note_repo
            .insert(&mut *tx, customer_id, user_id, content, note_type, false)
            .await?;

        self.customer_repo
            .touch_last_interaction(&mut *tx, customer_id)
            .await?;

        tx.commit().await?;

        // Limiar em scalar values; notas curtas nunca são anotadas,
        // independentemente do provedor.
        if self.snapshot().openai.is_some() && content.chars().count() > ANNOTATION_MIN_CONTENT_LEN
        {
            if let Err(e) = self
                .analysis
                .annotate_note(note_id, customer_id, user_id, content)
                .await
            {
                tracing::warn!("Análise da nota {} falhou (ignorada): {}", note_id, e);
            }
        }

        self.note_repo
            .find_detail(&self.pool, note_id)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    /// Caminho de áudio: transcreve primeiro (falha = falha da request) e
    /// registra a nota como transcrita. Este caminho não dispara anotação.
    pub async fn add_audio_note(
        &self,
        customer_id: i32,
        user_id: i32,
        audio: Vec<u8>,
        filename: &str,
    ) -> Result<Note, AppError> {
        let transcribed = self.analysis.transcribe(audio, filename).await?;

        let mut tx = self.pool.begin().await?;

        let note_id = self
            .note_repo
            .insert(
                &mut *tx,
                customer_id,
                user_id,
                &transcribed,
                NoteType::Audio,
                true,
            )
            .await?;

        self.customer_repo
            .touch_last_interaction(&mut *tx, customer_id)
            .await?;

        tx.commit().await?;

        self.note_repo
            .find_detail(&self.pool, note_id)
            .await?
            .ok_or(AppError::RecordNotFound)
    }
}
