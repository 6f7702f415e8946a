//! Settings - 階層化された設定（defaults → file → env）
//!
//! - `{dir}/default.toml`
//! - `{dir}/local.toml`（コミットしないローカル上書き）
//! - 環境変数 `REMINDER__GATEWAY__MODE=live` のような `REMINDER` プレフィックス + `__` 区切り

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub engine: EngineSettings,
    pub store: StoreSettings,
    pub clock: ClockSettings,
    pub observability: ObservabilitySettings,
}

/// どの MessageGateway 実装を使うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// 実際に HTTP で送信する
    Live,
    /// ログに出すだけ
    #[default]
    Logging,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub mode: GatewayMode,
    pub api_url: String,
    pub api_key: String,
    pub phone_number_id: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            mode: GatewayMode::Logging,
            api_url: String::new(),
            api_key: String::new(),
            phone_number_id: None,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// 同時に実行する送信数の上限（1 なら逐次）
    pub max_concurrent_sends: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_concurrent_sends: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// JsonFileBirthdayStore が読むファイル
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/birthdays.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// IANA タイムゾーン名（例: "Asia/Tokyo"）
    pub timezone: String,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl ClockSettings {
    pub fn tz(&self) -> Result<Tz, SettingsError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| SettingsError::Invalid(format!("clock.timezone: {e}")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilitySettings {
    pub log_level: String,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_path("config")
    }

    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, SettingsError> {
        let config_dir = config_dir.as_ref();

        let settings: Settings = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("REMINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.gateway.mode == GatewayMode::Live {
            if self.gateway.api_url.trim().is_empty() {
                return Err(SettingsError::Invalid(
                    "gateway.api_url is required in live mode".to_string(),
                ));
            }
            if self.gateway.api_key.trim().is_empty() {
                return Err(SettingsError::Invalid(
                    "gateway.api_key is required in live mode".to_string(),
                ));
            }
        }
        if self.gateway.timeout_seconds == 0 {
            return Err(SettingsError::Invalid(
                "gateway.timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.engine.max_concurrent_sends == 0 {
            return Err(SettingsError::Invalid(
                "engine.max_concurrent_sends must be greater than 0".to_string(),
            ));
        }
        self.clock.tz()?;
        Ok(())
    }
}
