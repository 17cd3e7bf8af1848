// src/services/analysis_service.rs
//
// Motor de anotação e análise: transforma texto livre (nota ou histórico do
// cliente) em um julgamento estruturado via provedor de linguagem, persiste
// o resultado e dispara a geração de tarefa quando o sinal é quente.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    config::{Providers, SharedProviders},
    db::{
        CustomerRepository, MeetingRepository, NoteRepository, ProposalRepository,
        ServiceRepository,
    },
    models::{
        analysis::{CustomerAnalysis, NoteAnnotation, NotePriority},
        customer::CustomerTemperature,
        message::TemplateType,
    },
    services::task_service::{
        TaskService, AI_FOLLOW_UP_TITLE, ANALYSIS_TASK_DUE_DAYS, NOTE_TASK_DUE_DAYS,
    },
};

/// Notas com esse tamanho ou menos nunca são anotadas.
pub const ANNOTATION_MIN_CONTENT_LEN: usize = 50;

const NOTE_SYSTEM_PROMPT: &str = "\
Você é um assistente de CRM. Analise a nota sobre o cliente e responda \
SOMENTE com JSON válido, sem texto extra, neste formato: \
{\"sentiment\": \"positive|neutral|negative\", \
\"priority\": \"low|medium|high\", \
\"suggestions\": \"sugestões curtas em português\", \
\"next_actions\": \"próximos passos em português\"}";

#[derive(Clone)]
pub struct AnalysisService {
    providers: SharedProviders,
    customer_repo: CustomerRepository,
    note_repo: NoteRepository,
    meeting_repo: MeetingRepository,
    proposal_repo: ProposalRepository,
    service_repo: ServiceRepository,
    task_service: TaskService,
    pool: PgPool,
}

impl AnalysisService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        providers: SharedProviders,
        customer_repo: CustomerRepository,
        note_repo: NoteRepository,
        meeting_repo: MeetingRepository,
        proposal_repo: ProposalRepository,
        service_repo: ServiceRepository,
        task_service: TaskService,
        pool: PgPool,
    ) -> Self {
        Self {
            providers,
            customer_repo,
            note_repo,
            meeting_repo,
            proposal_repo,
            service_repo,
            task_service,
            pool,
        }
    }

    fn snapshot(&self) -> Arc<Providers> {
        self.providers
            .read()
            .expect("lock de provedores envenenado")
            .clone()
    }

    // =========================================================================
    //  ANOTAÇÃO DE NOTA (caminho best-effort)
    // =========================================================================

    /// Anota uma nota recém-criada: chama o provedor, persiste a anotação e,
    /// se a prioridade vier alta, cria a tarefa de follow-up (+2 dias).
    /// Sem provedor configurado, é um no-op silencioso. O caller decide o que
    /// fazer com o Err (na criação de nota, loga e segue).
    pub async fn annotate_note(
        &self,
        note_id: i32,
        customer_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<(), AppError> {
        let snapshot = self.snapshot();
        let Some(openai) = snapshot.openai.as_ref() else {
            return Ok(());
        };

        let user_prompt = format!("Analise esta nota sobre o cliente: \"{}\"", content);
        let raw = openai.chat(NOTE_SYSTEM_PROMPT, &user_prompt, 500).await?;
        let annotation: NoteAnnotation = parse_model_json(&raw)?;

        self.note_repo
            .insert_annotation(
                &self.pool,
                note_id,
                &annotation,
                snapshot.annotation_confidence,
            )
            .await?;

        if annotation.priority == NotePriority::High && !annotation.next_actions.trim().is_empty() {
            self.task_service
                .create_ai_task(
                    customer_id,
                    user_id,
                    AI_FOLLOW_UP_TITLE,
                    &annotation.next_actions,
                    NOTE_TASK_DUE_DAYS,
                )
                .await?;
        }

        Ok(())
    }

    // =========================================================================
    //  ANÁLISE ESPECIALISTA DO CLIENTE (caminho primário)
    // =========================================================================

    /// Classifica o cliente (temperatura, orçamento, dificuldade) a partir de
    /// todo o histórico. Falha com 400 se o provedor não estiver configurado
    /// ou se não houver nenhum material para analisar.
    pub async fn analyze_customer(
        &self,
        customer_id: i32,
        user_id: i32,
    ) -> Result<CustomerAnalysis, AppError> {
        let snapshot = self.snapshot();
        let openai = snapshot
            .openai
            .as_ref()
            .ok_or(AppError::ProviderNotConfigured("OpenAI"))?;

        let customer = self
            .customer_repo
            .find_by_id(&self.pool, customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        let notes = self
            .note_repo
            .list_contents_for_customer(&self.pool, customer_id)
            .await?;
        let meetings = self
            .meeting_repo
            .list_summaries_for_customer(&self.pool, customer_id)
            .await?;
        let proposals = self
            .proposal_repo
            .list_summaries_for_customer(&self.pool, customer_id)
            .await?;

        if notes.is_empty() && meetings.is_empty() && proposals.is_empty() {
            return Err(AppError::InsufficientAnalysisData);
        }

        let catalog = self.service_repo.list_active_names(&self.pool).await?;

        let material = json!({
            "customer": {
                "name": format!("{} {}", customer.first_name, customer.last_name),
                "company": customer.company,
                "email": customer.email,
                "phone": customer.phone,
                "instagram": customer.instagram,
                "website": customer.website,
                "currentStatus": customer.status,
            },
            "notes": notes
                .iter()
                .map(|(content, note_type)| json!({ "content": content, "type": note_type }))
                .collect::<Vec<_>>(),
            "meetings": meetings
                .iter()
                .map(|(title, description, status)| {
                    json!({ "title": title, "description": description, "status": status })
                })
                .collect::<Vec<_>>(),
            "proposals": proposals
                .iter()
                .map(|(title, amount, status)| {
                    json!({ "title": title, "amount": amount, "status": status })
                })
                .collect::<Vec<_>>(),
        });

        let system_prompt = format!(
            "Você é um analista especialista de CRM de uma agência digital. \
             Avalie o histórico do cliente e responda SOMENTE com JSON válido neste formato: \
             {{\"customerType\": \"cold|warm|hot\", \
             \"interestedServices\": \"lista separada por vírgulas (use o catálogo: {})\", \
             \"potentialBudget\": valor numérico, \
             \"salesDifficultyScore\": inteiro de 1 a 10, \
             \"detailedAnalysis\": \"análise detalhada em português\", \
             \"recommendations\": \"recomendações em português\", \
             \"nextActions\": \"próximos passos em português\"}}",
            catalog.join(", ")
        );

        let user_prompt = format!("Analise os dados deste cliente: {}", material);
        let raw = openai.chat(&system_prompt, &user_prompt, 1500).await?;
        let analysis: CustomerAnalysis = parse_model_json(&raw)?;

        self.customer_repo
            .apply_analysis(&self.pool, customer_id, &analysis)
            .await?;

        // Cliente quente com próximos passos definidos vira tarefa urgente.
        if analysis.customer_type == CustomerTemperature::Hot
            && !analysis.next_actions.trim().is_empty()
        {
            self.task_service
                .create_ai_task(
                    customer_id,
                    user_id,
                    AI_FOLLOW_UP_TITLE,
                    &analysis.next_actions,
                    ANALYSIS_TASK_DUE_DAYS,
                )
                .await?;
        }

        Ok(analysis)
    }

    // =========================================================================
    //  ASSISTENTE DE VENDAS
    // =========================================================================

    /// Gera uma mensagem personalizada para o cliente conforme o tipo de
    /// template pedido.
    pub async fn generate_message(
        &self,
        customer_id: i32,
        message_type: TemplateType,
    ) -> Result<String, AppError> {
        let snapshot = self.snapshot();
        let openai = snapshot
            .openai
            .as_ref()
            .ok_or(AppError::ProviderNotConfigured("OpenAI"))?;

        let customer = self
            .customer_repo
            .find_by_id(&self.pool, customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        let first_name = customer.first_name.as_str();
        let company = customer.company.as_deref().unwrap_or("a empresa");

        let prompt = match message_type {
            TemplateType::FirstContact => format!(
                "Crie uma mensagem profissional de primeiro contato para {} ({}). \
                 Tom cordial e profissional.",
                first_name, company
            ),
            TemplateType::ProposalResponse => format!(
                "Crie uma mensagem de acompanhamento sobre a proposta enviada para {}. \
                 Tom gentil e encorajador.",
                first_name
            ),
            TemplateType::ThankYou => format!(
                "Crie uma mensagem de agradecimento pós-reunião para {}.",
                first_name
            ),
            TemplateType::FollowUp => format!(
                "Crie uma mensagem de follow-up para checar a decisão e as \
                 necessidades de {}.",
                first_name
            ),
        };

        openai
            .chat(
                "Você é um assistente de vendas de uma agência digital. Escreva \
                 mensagens personalizadas, cordiais e profissionais em português.",
                &prompt,
                200,
            )
            .await
    }

    // =========================================================================
    //  TRANSCRIÇÃO
    // =========================================================================

    /// Áudio -> texto puro (caminho primário: falha a request se o provedor
    /// estiver ausente ou der erro).
    pub async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AppError> {
        let snapshot = self.snapshot();
        let openai = snapshot
            .openai
            .as_ref()
            .ok_or(AppError::ProviderNotConfigured("OpenAI"))?;

        openai.transcribe(audio, filename, &snapshot.language).await
    }
}

// Interpreta a resposta do modelo como JSON, tolerando cerca de código
// (```json ... ```). Qualquer outra coisa é saída inanalisável.
fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, AppError> {
    let cleaned = strip_code_fence(raw.trim());
    serde_json::from_str(cleaned)
        .map_err(|e| AppError::ProviderError(format!("Resposta da IA inanalisável: {}", e)))
}

fn strip_code_fence(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("```") else {
        return raw;
    };
    // Descarta o rótulo da cerca ("json") até a quebra de linha.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::Sentiment;

    #[test]
    fn parses_plain_json_annotation() {
        let raw = r#"{"sentiment":"negative","priority":"high","suggestions":"","next_actions":"Ligar com urgência"}"#;
        let parsed: NoteAnnotation = parse_model_json(raw).unwrap();
        assert_eq!(parsed.sentiment, Sentiment::Negative);
        assert_eq!(parsed.priority, NotePriority::High);
        assert_eq!(parsed.next_actions, "Ligar com urgência");
    }

    #[test]
    fn parses_fenced_json_annotation() {
        let raw = "```json\n{\"sentiment\":\"positive\",\"priority\":\"low\"}\n```";
        let parsed: NoteAnnotation = parse_model_json(raw).unwrap();
        assert_eq!(parsed.sentiment, Sentiment::Positive);
        assert_eq!(parsed.priority, NotePriority::Low);
    }

    #[test]
    fn rejects_prose_output() {
        let raw = "Claro! Aqui está a análise da nota do cliente.";
        let result: Result<NoteAnnotation, _> = parse_model_json(raw);
        assert!(result.is_err());
    }

    #[test]
    fn strip_code_fence_keeps_plain_text_untouched() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn parses_customer_analysis_with_camel_case_keys() {
        let raw = r#"{"customerType":"hot","interestedServices":"SEO","potentialBudget":12000,"salesDifficultyScore":3,"detailedAnalysis":"x","recommendations":"y","nextActions":"fechar contrato"}"#;
        let parsed: CustomerAnalysis = parse_model_json(raw).unwrap();
        assert_eq!(parsed.customer_type, CustomerTemperature::Hot);
        assert_eq!(parsed.sales_difficulty_score, 3);
        assert_eq!(parsed.next_actions, "fechar contrato");
    }
}
