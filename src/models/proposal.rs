// src/models/proposal.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "proposal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: i32,
    pub customer_id: i32,
    pub user_id: i32,

    pub title: String,
    pub description: Option<String>,

    // Soma de quantity * unit_price dos itens, calculada na criação.
    pub total_amount: Decimal,

    pub status: ProposalStatus,
    pub valid_until: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[sqlx(default)]
    pub customer_name: Option<String>,
    #[sqlx(default)]
    pub company: Option<String>,
    #[sqlx(default)]
    pub user_name: Option<String>,

    // Itens agregados como JSON (json_agg no repositório); presente apenas
    // na listagem por cliente.
    #[sqlx(default)]
    #[schema(value_type = Option<Object>)]
    pub items: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalItemInput {
    pub service_id: i32,
    pub description: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub unit_price: Decimal,
}

fn default_quantity() -> i32 {
    1
}

impl ProposalItemInput {
    pub fn total_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Soma de quantity * unit_price de todos os itens.
pub fn items_total(items: &[ProposalItemInput]) -> Decimal {
    items.iter().map(|item| item.total_price()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32, unit_price: Decimal) -> ProposalItemInput {
        ProposalItemInput {
            service_id: 1,
            description: None,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn total_multiplies_quantity_by_unit_price() {
        let total = items_total(&[
            item(2, Decimal::new(150000, 2)), // 2 x 1500.00
            item(1, Decimal::new(50000, 2)),  // 1 x 500.00
        ]);
        assert_eq!(total, Decimal::new(350000, 2));
    }

    #[test]
    fn empty_item_list_totals_zero() {
        assert_eq!(items_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn quantity_defaults_to_one_when_omitted() {
        let parsed: ProposalItemInput =
            serde_json::from_str(r#"{"serviceId":3,"unitPrice":100.0}"#).unwrap();
        assert_eq!(parsed.quantity, 1);
    }
}
