//! EngineBuilder - エンジンの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - グローバルなシングルトンを使わず、依存を明示的に注入する

use std::sync::Arc;

use crate::config::{Settings, SettingsError};
use crate::domain::errors::GatewayError;
use crate::impls::{JsonFileBirthdayStore, build_gateway};
use crate::ports::{BirthdayStore, Clock, MessageGateway, SystemClock};

use super::engine::ReminderEngine;

/// EngineBuilder は ReminderEngine を構築
///
/// # 使用例
/// ```ignore
/// let engine = ReminderEngine::builder()
///     .store(Arc::new(JsonFileBirthdayStore::new("data/birthdays.json")))
///     .gateway(Arc::new(LoggingGateway::new()))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - store と gateway は必須。欠けていれば build() が BuildError を返す
/// - clock は省略時 `SystemClock::utc()`
pub struct EngineBuilder {
    store: Option<Arc<dyn BirthdayStore>>,
    gateway: Option<Arc<dyn MessageGateway>>,
    clock: Option<Arc<dyn Clock>>,
    max_concurrent_sends: usize,
}

/// BuildError はエンジン構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no BirthdayStore was configured")]
    MissingStore,

    #[error("no MessageGateway was configured")]
    MissingGateway,

    #[error("max_concurrent_sends must be greater than 0")]
    ZeroConcurrency,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            gateway: None,
            clock: None,
            max_concurrent_sends: 1,
        }
    }

    /// 設定から組み立てる
    ///
    /// - gateway: `gateway.mode` で明示的に選択
    /// - store: `store.path` の JsonFileBirthdayStore
    /// - clock: `clock.timezone` の SystemClock
    pub fn from_settings(settings: &Settings) -> Result<Self, BuildError> {
        settings.validate()?;
        let tz = settings.clock.tz()?;

        Ok(Self::new()
            .store(Arc::new(JsonFileBirthdayStore::new(&settings.store.path)))
            .gateway(build_gateway(&settings.gateway)?)
            .clock(Arc::new(SystemClock::new(tz)))
            .max_concurrent_sends(settings.engine.max_concurrent_sends))
    }

    pub fn store(mut self, store: Arc<dyn BirthdayStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn MessageGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn max_concurrent_sends(mut self, n: usize) -> Self {
        self.max_concurrent_sends = n;
        self
    }

    pub fn build(self) -> Result<ReminderEngine, BuildError> {
        let store = self.store.ok_or(BuildError::MissingStore)?;
        let gateway = self.gateway.ok_or(BuildError::MissingGateway)?;
        if self.max_concurrent_sends == 0 {
            return Err(BuildError::ZeroConcurrency);
        }
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock::utc()),
        };

        Ok(ReminderEngine::new(
            store,
            gateway,
            clock,
            self.max_concurrent_sends,
        ))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayMode;
    use crate::impls::LoggingGateway;

    #[test]
    fn test_build_success() {
        let engine = EngineBuilder::new()
            .store(Arc::new(JsonFileBirthdayStore::new("unused.json")))
            .gateway(Arc::new(LoggingGateway::new()))
            .max_concurrent_sends(4)
            .build();

        assert_eq!(engine.unwrap().max_concurrent_sends(), 4);
    }

    #[test]
    fn test_build_missing_store() {
        let engine = EngineBuilder::new()
            .gateway(Arc::new(LoggingGateway::new()))
            .build();
        assert!(matches!(engine, Err(BuildError::MissingStore)));
    }

    #[test]
    fn test_build_missing_gateway() {
        let engine = EngineBuilder::new()
            .store(Arc::new(JsonFileBirthdayStore::new("unused.json")))
            .build();
        assert!(matches!(engine, Err(BuildError::MissingGateway)));
    }

    #[test]
    fn test_build_zero_concurrency() {
        let engine = EngineBuilder::new()
            .store(Arc::new(JsonFileBirthdayStore::new("unused.json")))
            .gateway(Arc::new(LoggingGateway::new()))
            .max_concurrent_sends(0)
            .build();
        assert!(matches!(engine, Err(BuildError::ZeroConcurrency)));
    }

    #[test]
    fn test_from_settings_rejects_live_mode_without_url() {
        let mut settings = Settings::default();
        settings.gateway.mode = GatewayMode::Live;

        assert!(matches!(
            EngineBuilder::from_settings(&settings),
            Err(BuildError::Settings(_))
        ));
    }

    #[test]
    fn test_from_settings_defaults() {
        let engine = EngineBuilder::from_settings(&Settings::default())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(engine.max_concurrent_sends(), 1);
    }
}
