// src/services/customer_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::customer::{
        CreateCustomerPayload, Customer, CustomerStatus, UpdateCustomerPayload,
    },
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    pool: PgPool,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<CustomerStatus>,
    ) -> Result<Vec<Customer>, AppError> {
        self.repo.list(&self.pool, search, status).await
    }

    pub async fn get(&self, id: i32) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    /// Insere o cliente e as associações de serviço em uma transação, e
    /// devolve o registro hidratado.
    pub async fn create(&self, payload: CreateCustomerPayload) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;

        let id = self
            .repo
            .insert(
                &mut *tx,
                &payload.first_name,
                &payload.last_name,
                payload.email.as_deref(),
                payload.phone.as_deref(),
                payload.company.as_deref(),
                payload.instagram.as_deref(),
                payload.website.as_deref(),
                payload.status.unwrap_or(CustomerStatus::Potential),
            )
            .await?;

        if let Some(services) = &payload.services {
            for service_id in services {
                self.repo.add_service(&mut *tx, id, *service_id).await?;
            }
        }

        tx.commit().await?;

        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    /// Atualização parcial. `services` presente substitui o conjunto inteiro
    /// de associações (delete + insert, na mesma transação do update).
    pub async fn update(
        &self,
        id: i32,
        payload: UpdateCustomerPayload,
    ) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;

        // Sempre roda: mesmo sem campo base presente, updated_at é bumpado.
        self.repo.update_fields(&mut *tx, id, &payload).await?;

        if let Some(services) = &payload.services {
            self.repo.clear_services(&mut *tx, id).await?;
            for service_id in services {
                self.repo.add_service(&mut *tx, id, *service_id).await?;
            }
        }

        tx.commit().await?;

        // Cliente inexistente só aparece aqui, na releitura vazia.
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    /// Exclusão física; notas, tarefas, mensagens, reuniões e propostas caem
    /// em cascata. Id inexistente é um no-op bem-sucedido.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(&self.pool, id).await?;
        Ok(())
    }
}
