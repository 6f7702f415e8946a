//! BirthdayStore port - subject と所有ユーザーの正本（source of truth）
//!
//! CRUD はこのクレートの外側の責務です。エンジンは呼び出しごとに読むだけで、
//! キャッシュは持ちません。
//!
//! # 実装
//! - **InMemoryBirthdayStore**: テスト・デモ用
//! - **JsonFileBirthdayStore**: JSON ファイルを毎回読み込む

use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::subject::SubjectRecord;

/// BirthdayStore はリマインダー有効な subject を所有者の連絡先と結合して返す
///
/// # 設計原則
/// - 返す行は未検証（検証はエンジン側の境界で行う）
/// - 到達できない場合は `StoreError` を返し、呼び出し全体を失敗させる
#[async_trait]
pub trait BirthdayStore: Send + Sync {
    async fn find_all_with_reminder_enabled(&self) -> Result<Vec<SubjectRecord>, StoreError>;
}
