// src/integrations/openai.rs
//
// Cliente mínimo da API da OpenAI: chat completions (análises) e
// transcrição de áudio (Whisper). Só o que o CRM consome.

use serde::Deserialize;
use serde_json::json;

use crate::common::error::AppError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_MODEL: &str = "gpt-3.5-turbo";
const TRANSCRIPTION_MODEL: &str = "whisper-1";

#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

// Shape mínimo da resposta de chat/completions
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

// Shape de erro da API ({"error": {"message": "..."}})
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl OpenAiClient {
    // Sem timeout de cliente: a chamada bloqueia a request até o provedor
    // responder (não há retry nem cancelamento em nenhum caminho).
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Uma rodada de chat (system + user), devolvendo o texto da primeira
    /// escolha. Quem chama decide como interpretar o conteúdo.
    pub async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<String, AppError> {
        let body = json!({
            "model": CHAT_MODEL,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "max_tokens": max_tokens,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ProviderError(format!("OpenAI: {}", e)))?;

        let response = Self::check_status(response).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(format!("OpenAI: resposta inválida: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::ProviderError("OpenAI: resposta sem conteúdo".to_string())
            })?;

        Ok(content)
    }

    /// Transcreve um arquivo de áudio para texto puro.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
        language: &str,
    ) -> Result<String, AppError> {
        let file_part = reqwest::multipart::Part::bytes(audio).file_name(filename.to_string());

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", TRANSCRIPTION_MODEL)
            .text("language", language.to_string());

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ProviderError(format!("OpenAI: {}", e)))?;

        let response = Self::check_status(response).await?;

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(format!("OpenAI: resposta inválida: {}", e)))?;

        Ok(transcription.text)
    }

    // Converte status de erro na mensagem que o provedor mandou, quando der.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(parsed) => parsed.error.message,
            Err(_) => format!("status {}", status),
        };

        Err(AppError::ProviderError(format!("OpenAI: {}", message)))
    }
}
