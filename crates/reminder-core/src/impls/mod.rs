//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryBirthdayStore**: テスト・デモ用のストア
//! - **JsonFileBirthdayStore**: JSON スナップショットを読むストア
//! - **HttpMessageGateway**: 本番用の送信クライアント
//! - **LoggingGateway**: ログのみの送信スタブ

pub mod http_gateway;
pub mod inmem_store;
pub mod json_store;
pub mod logging_gateway;

use std::sync::Arc;

use crate::config::{GatewayMode, GatewaySettings};
use crate::domain::errors::GatewayError;
use crate::ports::MessageGateway;

// 主要な型を再エクスポート
pub use self::http_gateway::HttpMessageGateway;
pub use self::inmem_store::{InMemoryBirthdayStore, NewSubject};
pub use self::json_store::JsonFileBirthdayStore;
pub use self::logging_gateway::LoggingGateway;

/// 設定で選ばれた MessageGateway を組み立てる
pub fn build_gateway(settings: &GatewaySettings) -> Result<Arc<dyn MessageGateway>, GatewayError> {
    match settings.mode {
        GatewayMode::Live => Ok(Arc::new(HttpMessageGateway::from_settings(settings)?)),
        GatewayMode::Logging => Ok(Arc::new(LoggingGateway::new())),
    }
}
