//! reminder-core
//!
//! Core building blocks for the birthday reminder engine.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, occurrence, subject, calendar, policy, message, outcome, errors）
//! - **ports**: 抽象化レイヤー（BirthdayStore, MessageGateway, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（builder, engine）
//! - **impls**: 実装（InMemory/JSON ストア、HTTP/ログ送信）
//! - **config**: 階層化された設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use self::app::{BuildError, EngineBuilder, ReminderEngine};
pub use self::config::Settings;
