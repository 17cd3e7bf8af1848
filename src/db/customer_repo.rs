// src/db/customer_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::{
        analysis::CustomerAnalysis,
        customer::{Customer, CustomerStatus, UpdateCustomerPayload},
    },
};

// Toda leitura sai com o agregado de serviços; o GROUP BY pela PK deixa
// o Postgres aceitar o c.* inteiro.
const CUSTOMER_SELECT: &str = "\
    SELECT c.*, string_agg(s.name, ',') AS services \
    FROM customers c \
    LEFT JOIN customer_services cs ON cs.customer_id = c.id \
    LEFT JOIN services s ON s.id = cs.service_id";

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com filtro: busca por substring (nome, e-mail, empresa)
    /// e/ou status exato, ordenada do mais recentemente atualizado.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        search: Option<&str>,
        status: Option<CustomerStatus>,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(CUSTOMER_SELECT);
        let mut has_where = false;

        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            qb.push(" WHERE (c.first_name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR c.last_name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR c.email ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR c.company ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
            has_where = true;
        }

        if let Some(status) = status {
            qb.push(if has_where { " AND " } else { " WHERE " });
            qb.push("c.status = ");
            qb.push_bind(status);
        }

        qb.push(" GROUP BY c.id ORDER BY c.updated_at DESC");

        let customers = qb
            .build_query_as::<Customer>()
            .fetch_all(executor)
            .await?;

        Ok(customers)
    }

    /// Busca um cliente hidratado (com os nomes de serviços agregados).
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{} WHERE c.id = $1 GROUP BY c.id", CUSTOMER_SELECT);
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(customer)
    }

    /// Insere o registro base e devolve o id gerado. A associação de
    /// serviços e a releitura hidratada ficam por conta do service.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        company: Option<&str>,
        instagram: Option<&str>,
        website: Option<&str>,
        status: CustomerStatus,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO customers \
             (first_name, last_name, email, phone, company, instagram, website, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(company)
        .bind(instagram)
        .bind(website)
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    /// Atualização parcial: só os campos presentes entram no SET.
    /// `updated_at` é sempre bumpado, mesmo que nada mais mude.
    pub async fn update_fields<'e, E>(
        &self,
        executor: E,
        id: i32,
        payload: &UpdateCustomerPayload,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE customers SET updated_at = NOW()");

        if let Some(v) = &payload.first_name {
            qb.push(", first_name = ");
            qb.push_bind(v);
        }
        if let Some(v) = &payload.last_name {
            qb.push(", last_name = ");
            qb.push_bind(v);
        }
        if let Some(v) = &payload.email {
            qb.push(", email = ");
            qb.push_bind(v);
        }
        if let Some(v) = &payload.phone {
            qb.push(", phone = ");
            qb.push_bind(v);
        }
        if let Some(v) = &payload.company {
            qb.push(", company = ");
            qb.push_bind(v);
        }
        if let Some(v) = &payload.instagram {
            qb.push(", instagram = ");
            qb.push_bind(v);
        }
        if let Some(v) = &payload.website {
            qb.push(", website = ");
            qb.push_bind(v);
        }
        if let Some(v) = payload.status {
            qb.push(", status = ");
            qb.push_bind(v);
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id);

        let result = qb.build().execute(executor).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::from(e)
        })?;

        Ok(result.rows_affected())
    }

    /// Remove todas as associações de serviço do cliente.
    pub async fn clear_services<'e, E>(&self, executor: E, customer_id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM customer_services WHERE customer_id = $1")
            .bind(customer_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Associa um serviço do catálogo ao cliente.
    pub async fn add_service<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
        service_id: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO customer_services (customer_id, service_id) VALUES ($1, $2) \
             ON CONFLICT (customer_id, service_id) DO NOTHING",
        )
        .bind(customer_id)
        .bind(service_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Exclusão física; as dependências caem pelo ON DELETE CASCADE.
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Marca a interação mais recente (efeito incondicional de toda nota).
    pub async fn touch_last_interaction<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE customers SET last_interaction = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Grava o resultado da análise especialista nos campos de classificação.
    pub async fn apply_analysis<'e, E>(
        &self,
        executor: E,
        id: i32,
        analysis: &CustomerAnalysis,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // O modelo às vezes devolve score fora da faixa; o CHECK do banco
        // derrubaria a linha inteira, então saturamos aqui.
        let score = analysis.sales_difficulty_score.clamp(1, 10);

        sqlx::query(
            "UPDATE customers SET \
             customer_type = $1, \
             interested_services = $2, \
             potential_budget = $3, \
             sales_difficulty_score = $4, \
             ai_analysis_date = NOW(), \
             updated_at = NOW() \
             WHERE id = $5",
        )
        .bind(analysis.customer_type)
        .bind(&analysis.interested_services)
        .bind(analysis.potential_budget)
        .bind(score)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Casamento permissivo por sufixo de dígitos do telefone: devolve o
    /// PRIMEIRO cliente (menor id) cujo telefone contenha o sufixo.
    pub async fn find_first_by_phone_suffix<'e, E>(
        &self,
        executor: E,
        suffix: &str,
    ) -> Result<Option<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM customers \
             WHERE regexp_replace(COALESCE(phone, ''), '\\D', '', 'g') LIKE '%' || $1 || '%' \
             ORDER BY id ASC \
             LIMIT 1",
        )
        .bind(suffix)
        .fetch_optional(executor)
        .await?;
        Ok(id)
    }
}
