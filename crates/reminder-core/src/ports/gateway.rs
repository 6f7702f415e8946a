//! MessageGateway port - メッセージ送信の抽象化
//!
//! # 実装
//! - **HttpMessageGateway**: 本番用（WhatsApp Cloud API 互換）
//! - **LoggingGateway**: 非本番用。ログに出すだけで常に成功
//!
//! どちらを使うかは設定で明示的に選びます（環境変数の暗黙分岐はしない）。

use async_trait::async_trait;

use crate::domain::errors::GatewayError;
use crate::domain::outcome::Receipt;

/// MessageGateway は 1 件のメッセージを送信する
///
/// # 設計原則
/// - `address` は上流で検証済み（E.164 形式）
/// - 非 2xx 応答や通信障害は `GatewayError` に正規化する
/// - 成功時の応答はそのまま `Receipt` に入れる
#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn send(&self, address: &str, text: &str) -> Result<Receipt, GatewayError>;
}
