//! App - アプリケーション層
//!
//! ports を組み合わせて、1 回の呼び出し（候補の計算と送信）を実装します。
//!
//! # 主要コンポーネント
//! - **EngineBuilder**: 依存の注入と起動時検証
//! - **ReminderEngine**: check_pending / dispatch_all / send_test_message

pub mod builder;
pub mod engine;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, EngineBuilder};
pub use self::engine::ReminderEngine;
