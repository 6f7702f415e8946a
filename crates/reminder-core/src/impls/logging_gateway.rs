//! LoggingGateway - 非本番用の送信スタブ
//!
//! 実際には送信せず、tracing に出力して常に成功を返します。
//! エンジンの制御フローを外部依存なしで動かすためのものです。

use async_trait::async_trait;
use serde_json::json;

use crate::domain::errors::GatewayError;
use crate::domain::outcome::Receipt;
use crate::ports::MessageGateway;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingGateway;

impl LoggingGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageGateway for LoggingGateway {
    async fn send(&self, address: &str, text: &str) -> Result<Receipt, GatewayError> {
        tracing::info!(to = address, content = text, "message logged (delivery disabled)");
        Ok(Receipt::new(json!({
            "success": true,
            "message": "Message logged (delivery disabled)",
            "to": address,
            "content": text,
        })))
    }
}
