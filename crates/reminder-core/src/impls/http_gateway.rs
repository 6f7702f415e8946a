//! HttpMessageGateway - WhatsApp Cloud API 互換の送信クライアント
//!
//! `POST {api_url}/messages` に Bearer トークン付きで JSON を送ります。
//! `phone_number_id` が設定されていれば `POST {api_url}/{phone_number_id}/messages`。

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::config::GatewaySettings;
use crate::domain::errors::GatewayError;
use crate::domain::outcome::Receipt;
use crate::ports::MessageGateway;

pub struct HttpMessageGateway {
    client: Client,
    messages_url: String,
    api_key: String,
}

impl HttpMessageGateway {
    pub fn new(
        api_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            messages_url: format!("{}/messages", api_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        if settings.api_url.trim().is_empty() {
            return Err(GatewayError::Config("api_url is empty".to_string()));
        }
        let base = match settings.phone_number_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                format!("{}/{id}", settings.api_url.trim_end_matches('/'))
            }
            _ => settings.api_url.clone(),
        };
        Self::new(
            &base,
            settings.api_key.clone(),
            Duration::from_secs(settings.timeout_seconds),
        )
    }
}

#[async_trait]
impl MessageGateway for HttpMessageGateway {
    #[tracing::instrument(skip(self, text), fields(url = %self.messages_url))]
    async fn send(&self, address: &str, text: &str) -> Result<Receipt, GatewayError> {
        let body = json!({
            "messaging_product": "whatsapp",
            "to": address,
            "type": "text",
            "text": { "body": text }
        });

        let response = self
            .client
            .post(&self.messages_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "gateway rejected message");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let receipt: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("unreadable gateway response: {e}")))?;

        tracing::debug!("gateway accepted message");
        Ok(Receipt::new(receipt))
    }
}
