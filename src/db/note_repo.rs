// src/db/note_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        analysis::NoteAnnotation,
        note::{Note, NoteType},
    },
};

// Nota + autor + (se existir) a anotação de IA, em uma leitura só.
const NOTE_SELECT: &str = "\
    SELECT n.id, n.customer_id, n.user_id, n.type, n.content, n.is_transcribed, n.created_at, \
           u.username AS author_name, \
           a.sentiment, a.priority, a.suggestions, a.next_actions, a.confidence_score \
    FROM notes n \
    LEFT JOIN users u ON u.id = n.user_id \
    LEFT JOIN ai_analysis a ON a.note_id = n.id";

#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
        user_id: i32,
        content: &str,
        note_type: NoteType,
        is_transcribed: bool,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO notes (customer_id, user_id, content, type, is_transcribed) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(customer_id)
        .bind(user_id)
        .bind(content)
        .bind(note_type)
        .bind(is_transcribed)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn find_detail<'e, E>(&self, executor: E, id: i32) -> Result<Option<Note>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} WHERE n.id = $1", NOTE_SELECT);
        let note = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(note)
    }

    pub async fn list_for_customer<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
    ) -> Result<Vec<Note>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "{} WHERE n.customer_id = $1 ORDER BY n.created_at DESC",
            NOTE_SELECT
        );
        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(customer_id)
            .fetch_all(executor)
            .await?;
        Ok(notes)
    }

    /// Persiste a anotação 1:1 da nota. O confidence vem da configuração
    /// (constante), nunca do provedor.
    pub async fn insert_annotation<'e, E>(
        &self,
        executor: E,
        note_id: i32,
        annotation: &NoteAnnotation,
        confidence: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO ai_analysis \
             (note_id, sentiment, priority, suggestions, next_actions, confidence_score) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(note_id)
        .bind(annotation.sentiment.as_str())
        .bind(annotation.priority.as_str())
        .bind(&annotation.suggestions)
        .bind(&annotation.next_actions)
        .bind(confidence)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Conteúdo das notas de um cliente, da mais nova para a mais velha
    /// (material de entrada da análise especialista).
    pub async fn list_contents_for_customer<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
    ) -> Result<Vec<(String, NoteType)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, (String, NoteType)>(
            "SELECT content, type FROM notes WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }
}
