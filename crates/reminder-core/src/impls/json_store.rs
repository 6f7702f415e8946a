//! JsonFileBirthdayStore - JSON ファイルを読むストア
//!
//! CRUD 層が書き出したスナップショット（`SubjectRecord` の配列）を
//! 呼び出しごとに読み直します。
//!
//! - ファイルが読めない → `StoreError::Unavailable`
//! - JSON 配列でない → `StoreError::Corrupt`
//! - 読めない行 → ログに残してスキップ（他の行は返す）

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::errors::StoreError;
use crate::domain::subject::SubjectRecord;
use crate::ports::BirthdayStore;

pub struct JsonFileBirthdayStore {
    path: PathBuf,
}

impl JsonFileBirthdayStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BirthdayStore for JsonFileBirthdayStore {
    async fn find_all_with_reminder_enabled(&self) -> Result<Vec<SubjectRecord>, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display())))?;

        let rows: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))?;

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<SubjectRecord>(row) {
                Ok(record) if record.reminder_enabled => records.push(record),
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        error = %e,
                        "skipping unreadable row"
                    );
                }
            }
        }
        Ok(records)
    }
}
