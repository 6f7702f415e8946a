//! InMemoryBirthdayStore - テスト・デモ用のストア
//!
//! CRUD 層の代わりに、テストから行を登録・変更できるようにしています。

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::domain::errors::StoreError;
use crate::domain::ids::{OwnerId, SubjectId};
use crate::domain::subject::{OwnerRecord, SubjectRecord};
use crate::ports::{BirthdayStore, IdGenerator};

/// 新規登録用の入力（ID はストアが採番する）
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub notify_before_days: i64,
    pub reminder_enabled: bool,
    pub message_template: Option<String>,
}

impl NewSubject {
    pub fn new(name: impl Into<String>, month: u32, day: u32) -> Self {
        Self {
            name: name.into(),
            month,
            day,
            notify_before_days: 0,
            reminder_enabled: true,
            message_template: None,
        }
    }

    pub fn notify_before(mut self, days: i64) -> Self {
        self.notify_before_days = days;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.reminder_enabled = false;
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.message_template = Some(template.into());
        self
    }
}

#[derive(Default)]
struct State {
    owners: BTreeMap<OwnerId, Option<String>>,
    subjects: BTreeMap<SubjectId, (OwnerId, NewSubject)>,
}

/// InMemoryBirthdayStore は Mutex で保護した BTreeMap に行を保持
///
/// `find_all_with_reminder_enabled` は呼び出し時点の内容を ID 順で返します。
pub struct InMemoryBirthdayStore<G> {
    ids: G,
    state: Mutex<State>,
}

impl<G: IdGenerator> InMemoryBirthdayStore<G> {
    pub fn new(ids: G) -> Self {
        Self {
            ids,
            state: Mutex::new(State::default()),
        }
    }

    pub async fn add_owner(&self, contact_address: Option<&str>) -> OwnerId {
        let id = self.ids.generate_owner_id();
        let mut state = self.state.lock().await;
        state.owners.insert(id, contact_address.map(str::to_string));
        id
    }

    pub async fn add_subject(&self, owner: OwnerId, subject: NewSubject) -> SubjectId {
        let id = self.ids.generate_subject_id();
        let mut state = self.state.lock().await;
        state.subjects.insert(id, (owner, subject));
        id
    }

    /// 連絡先の変更（`None` で削除）
    pub async fn set_contact(&self, owner: OwnerId, contact_address: Option<&str>) {
        let mut state = self.state.lock().await;
        state.owners.insert(owner, contact_address.map(str::to_string));
    }

    pub async fn set_enabled(&self, subject: SubjectId, enabled: bool) {
        let mut state = self.state.lock().await;
        if let Some((_, s)) = state.subjects.get_mut(&subject) {
            s.reminder_enabled = enabled;
        }
    }

    pub async fn remove_subject(&self, subject: SubjectId) {
        self.state.lock().await.subjects.remove(&subject);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.subjects.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<G: IdGenerator> BirthdayStore for InMemoryBirthdayStore<G> {
    async fn find_all_with_reminder_enabled(&self) -> Result<Vec<SubjectRecord>, StoreError> {
        let state = self.state.lock().await;
        let records = state
            .subjects
            .iter()
            .filter(|(_, (_, s))| s.reminder_enabled)
            .map(|(id, (owner_id, s))| SubjectRecord {
                id: *id,
                name: s.name.clone(),
                month: s.month,
                day: s.day,
                notify_before_days: s.notify_before_days,
                reminder_enabled: s.reminder_enabled,
                message_template: s.message_template.clone(),
                owner: OwnerRecord {
                    id: *owner_id,
                    // 所有者の行が消えていれば連絡先なしとして扱う
                    contact_address: state.owners.get(owner_id).cloned().flatten(),
                },
            })
            .collect();
        Ok(records)
    }
}
