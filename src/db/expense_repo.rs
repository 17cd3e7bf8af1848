// src/db/expense_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::expense::Expense};

const EXPENSE_SELECT: &str = "\
    SELECT e.*, \
           c.first_name || ' ' || c.last_name AS customer_name, \
           p.title AS proposal_title \
    FROM expenses e \
    LEFT JOIN customers c ON c.id = e.customer_id \
    LEFT JOIN proposals p ON p.id = e.proposal_id";

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        customer_id: Option<i32>,
        proposal_id: Option<i32>,
        title: &str,
        description: Option<&str>,
        amount: Decimal,
        category: Option<&str>,
        expense_date: NaiveDate,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO expenses \
             (customer_id, proposal_id, title, description, amount, category, expense_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(customer_id)
        .bind(proposal_id)
        .bind(title)
        .bind(description)
        .bind(amount)
        .bind(category)
        .bind(expense_date)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn find_detail<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} WHERE e.id = $1", EXPENSE_SELECT);
        let expense = sqlx::query_as::<_, Expense>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(expense)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} ORDER BY e.expense_date DESC", EXPENSE_SELECT);
        let expenses = sqlx::query_as::<_, Expense>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(expenses)
    }
}
