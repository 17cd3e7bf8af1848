// src/db/task_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::task::{Task, TaskPriority, TaskStatus, TaskType},
};

const TASK_SELECT: &str = "\
    SELECT t.*, \
           c.first_name || ' ' || c.last_name AS customer_name, \
           c.company \
    FROM tasks t \
    LEFT JOIN customers c ON c.id = t.customer_id";

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
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
        priority: TaskPriority,
        due_date: Option<DateTime<Utc>>,
        task_type: TaskType,
        created_by_ai: bool,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO tasks \
             (customer_id, user_id, title, description, priority, due_date, task_type, created_by_ai) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(customer_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(due_date)
        .bind(task_type)
        .bind(created_by_ai)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn find_detail<'e, E>(&self, executor: E, id: i32) -> Result<Option<Task>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} WHERE t.id = $1", TASK_SELECT);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(task)
    }

    /// Tarefas do usuário: prioridade alta primeiro, depois vencimento.
    pub async fn list_for_user<'e, E>(&self, executor: E, user_id: i32) -> Result<Vec<Task>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "{} WHERE t.user_id = $1 \
             ORDER BY \
               CASE t.priority \
                 WHEN 'high' THEN 1 \
                 WHEN 'medium' THEN 2 \
                 WHEN 'low' THEN 3 \
               END, \
               t.due_date ASC NULLS LAST",
            TASK_SELECT
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(executor)
            .await?;
        Ok(tasks)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i32,
        status: TaskStatus,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE tasks SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
