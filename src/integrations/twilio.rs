// src/integrations/twilio.rs
//
// Cliente da API de mensagens da Twilio (canal WhatsApp). Autenticação
// básica com Account SID + Auth Token, corpo form-urlencoded.

use serde::Deserialize;

use crate::common::error::AppError;

const DEFAULT_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

#[derive(Clone)]
pub struct TwilioClient {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    base_url: String,
}

/// O que interessa da resposta do provedor: o identificador da mensagem
/// e o status de entrega reportado (gravado como veio).
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioMessage {
    pub sid: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: String,
}

impl TwilioClient {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        // O número de origem precisa do prefixo de canal.
        let from_number = if from_number.starts_with("whatsapp:") {
            from_number
        } else {
            format!("whatsapp:{}", from_number)
        };

        Self {
            http: reqwest::Client::new(),
            account_sid,
            auth_token,
            from_number,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Envia uma mensagem de WhatsApp. `to` já vem no formato
    /// "whatsapp:+<dígitos>" (ver common::phone::whatsapp_address).
    pub async fn send_whatsapp(&self, to: &str, body: &str) -> Result<TwilioMessage, AppError> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let response = self
            .http
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("From", self.from_number.as_str()),
                ("To", to),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| AppError::ProviderError(format!("Twilio: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<TwilioErrorResponse>().await {
                Ok(parsed) => parsed.message,
                Err(_) => format!("status {}", status),
            };
            return Err(AppError::ProviderError(format!("Twilio: {}", message)));
        }

        let message: TwilioMessage = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(format!("Twilio: resposta inválida: {}", e)))?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_number_gains_channel_prefix() {
        let client = TwilioClient::new("sid".into(), "token".into(), "+14155238886".into());
        assert_eq!(client.from_number, "whatsapp:+14155238886");
    }

    #[test]
    fn from_number_prefix_is_not_duplicated() {
        let client =
            TwilioClient::new("sid".into(), "token".into(), "whatsapp:+14155238886".into());
        assert_eq!(client.from_number, "whatsapp:+14155238886");
    }
}
