// src/models/analysis.rs
//
// Shapes do julgamento estruturado que o provedor de análise devolve.
// O modelo é instruído a responder JSON estrito com estes campos; valores
// ausentes caem nos padrões.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::customer::CustomerTemperature;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotePriority {
    Low,
    Medium,
    High,
}

impl NotePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotePriority::Low => "low",
            NotePriority::Medium => "medium",
            NotePriority::High => "high",
        }
    }
}

// Anotação de uma única nota (sentimento, prioridade, sugestões, próximos
// passos). O score de confiança NÃO vem daqui: é uma constante configurada
// (o provedor não calcula confiança de verdade).
#[derive(Debug, Clone, Deserialize)]
pub struct NoteAnnotation {
    #[serde(default = "default_sentiment")]
    pub sentiment: Sentiment,
    #[serde(default = "default_priority")]
    pub priority: NotePriority,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub next_actions: String,
}

fn default_sentiment() -> Sentiment {
    Sentiment::Neutral
}

fn default_priority() -> NotePriority {
    NotePriority::Medium
}

// Análise completa do cliente ("analista especialista"): classifica a
// temperatura e estima orçamento e dificuldade de venda.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAnalysis {
    #[serde(default = "default_temperature")]
    pub customer_type: CustomerTemperature,
    #[serde(default)]
    pub interested_services: String,
    #[serde(default)]
    pub potential_budget: Decimal,
    #[serde(default = "default_difficulty")]
    pub sales_difficulty_score: i32,
    #[serde(default)]
    pub detailed_analysis: String,
    #[serde(default)]
    pub recommendations: String,
    #[serde(default)]
    pub next_actions: String,
}

fn default_temperature() -> CustomerTemperature {
    CustomerTemperature::Cold
}

fn default_difficulty() -> i32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_annotation_fills_missing_fields_with_defaults() {
        let parsed: NoteAnnotation = serde_json::from_str(r#"{"sentiment":"negative"}"#).unwrap();
        assert_eq!(parsed.sentiment, Sentiment::Negative);
        assert_eq!(parsed.priority, NotePriority::Medium);
        assert!(parsed.suggestions.is_empty());
    }

    #[test]
    fn note_annotation_rejects_unknown_enum_values() {
        // Resposta fora do contrato ("pozitif" etc.) = saída inanalisável.
        let result = serde_json::from_str::<NoteAnnotation>(r#"{"sentiment":"pozitif"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn customer_analysis_defaults_fill_empty_response() {
        let parsed: CustomerAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.customer_type, CustomerTemperature::Cold);
        assert_eq!(parsed.sales_difficulty_score, 5);
        assert_eq!(parsed.potential_budget, Decimal::ZERO);
    }
}
