//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! エンジンは外部システム（ストア、メッセージ送信、時計）を
//! すべてこの trait 越しに扱います。

pub mod birthday_store;
pub mod clock;
pub mod gateway;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::birthday_store::BirthdayStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::gateway::MessageGateway;
pub use self::id_generator::{IdGenerator, UlidGenerator};
