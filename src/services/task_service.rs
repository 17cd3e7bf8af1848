// src/services/task_service.rs

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::TaskRepository,
    models::task::{Task, TaskPriority, TaskStatus, TaskType},
};

/// Título fixo das tarefas geradas pela IA.
pub const AI_FOLLOW_UP_TITLE: &str = "Sugestão da IA: Follow-up Urgente";

/// Vencimento das tarefas disparadas pela anotação de nota.
pub const NOTE_TASK_DUE_DAYS: i64 = 2;

/// Vencimento das tarefas disparadas pela análise especialista do cliente.
pub const ANALYSIS_TASK_DUE_DAYS: i64 = 1;

#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
    pool: PgPool,
}

impl TaskService {
    pub fn new(repo: TaskRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        self.repo.list_for_user(&self.pool, user_id).await
    }

    pub async fn create_manual_task(
        &self,
        customer_id: i32,
        user_id: i32,
        title: &str,
        description: Option<&str>,
        priority: TaskPriority,
        due_date: Option<DateTime<Utc>>,
        task_type: TaskType,
    ) -> Result<Task, AppError> {
        // Invariante: created_by_ai anda junto com o task_type, mesmo que o
        // caller mande ai_generated pela rota manual.
        let created_by_ai = task_type == TaskType::AiGenerated;

        let id = self
            .repo
            .insert(
                &self.pool,
                customer_id,
                user_id,
                title,
                description,
                priority,
                due_date,
                task_type,
                created_by_ai,
            )
            .await?;

        self.repo
            .find_detail(&self.pool, id)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    /// Insere uma tarefa gerada pela IA. Dois pontos de disparo: anotação de
    /// nota com prioridade alta (+2 dias) e análise "hot" do cliente (+1 dia).
    /// Não há deduplicação: disparos repetidos criam tarefas repetidas.
    pub async fn create_ai_task(
        &self,
        customer_id: i32,
        user_id: i32,
        title: &str,
        description: &str,
        due_in_days: i64,
    ) -> Result<i32, AppError> {
        self.repo
            .insert(
                &self.pool,
                customer_id,
                user_id,
                title,
                Some(description),
                TaskPriority::High,
                Some(due_in(due_in_days)),
                TaskType::AiGenerated,
                true,
            )
            .await
    }

    pub async fn update_status(&self, id: i32, status: TaskStatus) -> Result<Task, AppError> {
        self.repo.update_status(&self.pool, id, status).await?;
        self.repo
            .find_detail(&self.pool, id)
            .await?
            .ok_or(AppError::RecordNotFound)
    }
}

fn due_in(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_in_offsets_from_now() {
        let due = due_in(NOTE_TASK_DUE_DAYS);
        let delta = due - Utc::now();
        assert!(delta > Duration::days(1) && delta <= Duration::days(2));
    }

    #[test]
    fn ai_offsets_are_the_documented_ones() {
        assert_eq!(NOTE_TASK_DUE_DAYS, 2);
        assert_eq!(ANALYSIS_TASK_DUE_DAYS, 1);
    }
}
