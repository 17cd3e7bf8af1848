// src/models/customer.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- ENUMS ---

// Mapeia o CREATE TYPE customer_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "customer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Potential,
}

// Temperatura do funil: só é preenchida pelo fluxo de análise da IA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "customer_temperature", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CustomerTemperature {
    Cold,
    Warm,
    Hot,
}

// --- CLIENTE ---

// Toda leitura de cliente sai hidratada com o agregado de serviços
// (string_agg no repositório), igual ao shape que o frontend consome.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,

    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,

    pub status: CustomerStatus,
    pub avatar: Option<String>,
    pub last_interaction: Option<DateTime<Utc>>,

    // Classificação: nula até a primeira análise rodar.
    pub customer_type: Option<CustomerTemperature>,
    pub potential_budget: Option<Decimal>,
    pub sales_difficulty_score: Option<i32>,
    pub interested_services: Option<String>,
    pub ai_analysis_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Nomes dos serviços associados, separados por vírgula.
    #[schema(example = "SEO,Google Ads")]
    pub services: Option<String>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria")]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "da Silva")]
    pub last_name: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,

    // Se omitido, o cliente entra como 'potential'.
    pub status: Option<CustomerStatus>,

    // IDs do catálogo de serviços a associar.
    #[schema(example = json!([1, 3]))]
    pub services: Option<Vec<i32>>,
}

// Atualização parcial: apenas os campos presentes são aplicados.
// `services`, quando presente, substitui o conjunto inteiro de associações.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,
    pub status: Option<CustomerStatus>,

    pub services: Option<Vec<i32>>,
}
