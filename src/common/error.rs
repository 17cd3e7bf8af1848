use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Toda falha vira um JSON `{"error": "mensagem"}` com status 400-500;
// não existe código de erro legível por máquina, apenas o texto.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Cliente sem telefone cadastrado")]
    CustomerPhoneMissing,

    #[error("Registro não encontrado")]
    RecordNotFound,

    // Integração externa ausente: o nome aparece na mensagem ao usuário.
    #[error("Integração não configurada: {0}")]
    ProviderNotConfigured(&'static str),

    // Falha do provedor externo em um caminho primário (envio, transcrição,
    // análise sob demanda). A mensagem do provedor vai direto para o caller.
    #[error("Erro do provedor externo: {0}")]
    ProviderError(String),

    #[error("Dados insuficientes para análise")]
    InsufficientAnalysisData,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está cadastrado.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::CustomerNotFound => {
                (StatusCode::NOT_FOUND, "Cliente não encontrado.".to_string())
            }
            AppError::CustomerPhoneMissing => (
                StatusCode::BAD_REQUEST,
                "O cliente não possui telefone cadastrado.".to_string(),
            ),
            AppError::RecordNotFound => {
                (StatusCode::NOT_FOUND, "Registro não encontrado.".to_string())
            }
            AppError::ProviderNotConfigured(provider) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Integração com {} não configurada. Verifique o painel de administração.",
                    provider
                ),
            ),
            AppError::ProviderError(message) => {
                tracing::error!("Erro do provedor externo: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            AppError::InsufficientAnalysisData => (
                StatusCode::BAD_REQUEST,
                "Dados insuficientes para análise. Cadastre notas, reuniões ou propostas antes."
                    .to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
