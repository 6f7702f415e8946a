//! ReminderEngine - 候補の計算と送信のオーケストレーション
//!
//! # フロー
//! 1. BirthdayStore から有効な subject を読む（失敗したら呼び出し全体が失敗）
//! 2. 行を検証し、壊れた行はログに残してスキップ
//! 3. DateMath → ReminderPolicy で候補を決める
//! 4. 候補ごとにメッセージを組み立てて MessageGateway に送る
//! 5. 候補ごとの成功・失敗をまとめて返す（1 件の失敗は他に影響しない）

use futures::{StreamExt, stream};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::calendar::days_until_next_occurrence;
use crate::domain::candidate::ReminderCandidate;
use crate::domain::errors::{ReminderError, ValidationError};
use crate::domain::message;
use crate::domain::outcome::{DispatchReport, DispatchResult, PendingReport, Receipt};
use crate::domain::policy::should_fire;
use crate::ports::{BirthdayStore, Clock, MessageGateway};

use super::builder::EngineBuilder;

/// Computes due reminders and dispatches them through the gateway.
///
/// Holds no state between invocations. Running `dispatch_all` twice on the
/// same day sends the same reminders twice.
pub struct ReminderEngine {
    store: Arc<dyn BirthdayStore>,
    gateway: Arc<dyn MessageGateway>,
    clock: Arc<dyn Clock>,
    max_concurrent_sends: usize,
}

impl ReminderEngine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn new(
        store: Arc<dyn BirthdayStore>,
        gateway: Arc<dyn MessageGateway>,
        clock: Arc<dyn Clock>,
        max_concurrent_sends: usize,
    ) -> Self {
        Self {
            store,
            gateway,
            clock,
            max_concurrent_sends: max_concurrent_sends.max(1),
        }
    }

    pub fn max_concurrent_sends(&self) -> usize {
        self.max_concurrent_sends
    }

    /// Subjects due for a reminder today, ordered by subject id.
    pub async fn pending_candidates(&self) -> Result<Vec<ReminderCandidate>, ReminderError> {
        let today = self.clock.today();
        let records = self.store.find_all_with_reminder_enabled().await?;

        let mut candidates = Vec::new();
        for record in records {
            if !record.reminder_enabled {
                debug!(subject = %record.id, "store returned a disabled subject; ignoring");
                continue;
            }
            let (subject, owner) = match record.validate() {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(subject = %record.id, error = %e, "skipping malformed subject");
                    continue;
                }
            };

            let days_until = days_until_next_occurrence(subject.occurrence, today);
            if should_fire(days_until, subject.notify_before) {
                candidates.push(ReminderCandidate::new(subject, owner, days_until));
            }
        }

        candidates.sort_by_key(|c| c.subject.id);
        Ok(candidates)
    }

    #[tracing::instrument(skip(self))]
    pub async fn check_pending(&self) -> Result<PendingReport, ReminderError> {
        let checked_at = self.clock.now();
        let candidates = self.pending_candidates().await?;
        info!(count = candidates.len(), "pending reminders checked");
        Ok(PendingReport::new(checked_at, &candidates))
    }

    /// Sends every pending reminder.
    ///
    /// Only a store failure fails the call; per-candidate failures are in the report.
    #[tracing::instrument(skip(self), fields(concurrency = self.max_concurrent_sends))]
    pub async fn dispatch_all(&self) -> Result<DispatchReport, ReminderError> {
        let checked_at = self.clock.now();
        let candidates = self.pending_candidates().await?;
        if candidates.is_empty() {
            info!("no reminders to send");
        }

        // buffered は完了順ではなく入力順で結果を返す
        let items: Vec<DispatchResult> = stream::iter(candidates.iter())
            .map(|candidate| self.dispatch_one(candidate))
            .buffered(self.max_concurrent_sends)
            .collect()
            .await;

        let report = DispatchReport::new(checked_at, items);
        info!(
            total = report.total,
            succeeded = report.success_count,
            failed = report.failure_count,
            "reminder batch finished"
        );
        Ok(report)
    }

    /// Sends `text` to `address` directly. Diagnostic only.
    #[tracing::instrument(skip(self, text))]
    pub async fn send_test_message(
        &self,
        address: &str,
        text: &str,
    ) -> Result<Receipt, ReminderError> {
        if address.trim().is_empty() {
            return Err(ValidationError::MissingField("address").into());
        }
        if text.trim().is_empty() {
            return Err(ValidationError::MissingField("text").into());
        }
        Ok(self.gateway.send(address.trim(), text).await?)
    }

    async fn dispatch_one(&self, candidate: &ReminderCandidate) -> DispatchResult {
        let address = match candidate.owner.address() {
            Ok(address) => address,
            Err(e) => {
                warn!(subject = %candidate.subject.id, error = %e, "reminder not sent");
                return DispatchResult::failure(candidate, None, e.to_string());
            }
        };

        let text = message::compose(candidate);
        match self.gateway.send(address.as_str(), &text).await {
            Ok(receipt) => {
                info!(subject = %candidate.subject.id, to = %address, "reminder sent");
                DispatchResult::success(candidate, address.as_str(), receipt)
            }
            Err(e) => {
                warn!(subject = %candidate.subject.id, error = %e, "reminder failed");
                DispatchResult::failure(candidate, Some(address.as_str()), e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{GatewayError, StoreError};
    use crate::domain::ids::{OwnerId, SubjectId};
    use crate::domain::subject::{OwnerRecord, SubjectRecord};
    use crate::impls::LoggingGateway;
    use crate::ports::FixedClock;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use ulid::Ulid;

    struct StaticStore(Vec<SubjectRecord>);

    #[async_trait]
    impl BirthdayStore for StaticStore {
        async fn find_all_with_reminder_enabled(&self) -> Result<Vec<SubjectRecord>, StoreError> {
            Ok(self.0.clone())
        }
    }

    struct DownStore;

    #[async_trait]
    impl BirthdayStore for DownStore {
        async fn find_all_with_reminder_enabled(&self) -> Result<Vec<SubjectRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[derive(Default)]
    struct CountingGateway {
        sends: AtomicUsize,
    }

    #[async_trait]
    impl MessageGateway for CountingGateway {
        async fn send(&self, _address: &str, _text: &str) -> Result<Receipt, GatewayError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            Ok(Receipt::new(serde_json::json!({ "ok": true })))
        }
    }

    struct RejectingGateway;

    #[async_trait]
    impl MessageGateway for RejectingGateway {
        async fn send(&self, _address: &str, _text: &str) -> Result<Receipt, GatewayError> {
            Err(GatewayError::Transport("timed out".into()))
        }
    }

    fn record(seq: u64, name: &str, month: u32, day: u32, notify: i64) -> SubjectRecord {
        SubjectRecord {
            id: SubjectId::from_ulid(Ulid::from_parts(seq, 0)),
            name: name.to_string(),
            month,
            day,
            notify_before_days: notify,
            reminder_enabled: true,
            message_template: None,
            owner: OwnerRecord {
                id: OwnerId::from_ulid(Ulid::from_parts(seq, 1)),
                contact_address: Some("+14155550100".to_string()),
            },
        }
    }

    fn engine(
        store: impl BirthdayStore + 'static,
        gateway: impl MessageGateway + 'static,
    ) -> ReminderEngine {
        ReminderEngine::new(
            Arc::new(store),
            Arc::new(gateway),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())),
            1,
        )
    }

    #[tokio::test]
    async fn candidates_are_sorted_by_subject_id() {
        let store = StaticStore(vec![
            record(3, "C", 3, 10, 0),
            record(1, "A", 3, 10, 0),
            record(2, "B", 3, 10, 0),
        ]);
        let candidates = engine(store, LoggingGateway)
            .pending_candidates()
            .await
            .unwrap();

        let names: Vec<_> = candidates
            .iter()
            .map(|c| c.subject.display_name.as_str())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn malformed_records_are_skipped() {
        let store = StaticStore(vec![
            record(1, "Bad offset", 3, 10, 3),
            record(2, "Bad date", 2, 30, 0),
            record(3, "Good", 3, 10, 0),
        ]);
        let report = engine(store, LoggingGateway).check_pending().await.unwrap();

        assert_eq!(report.count, 1);
        assert_eq!(report.items[0].subject_name, "Good");
    }

    #[tokio::test]
    async fn disabled_rows_from_a_sloppy_store_are_ignored() {
        let mut off = record(1, "Off", 3, 10, 0);
        off.reminder_enabled = false;
        let report = engine(StaticStore(vec![off]), LoggingGateway)
            .check_pending()
            .await
            .unwrap();

        assert_eq!(report.count, 0);
    }

    #[tokio::test]
    async fn store_failure_aborts_the_invocation() {
        let engine = engine(DownStore, LoggingGateway);

        assert!(matches!(
            engine.check_pending().await,
            Err(ReminderError::Store(StoreError::Unavailable(_)))
        ));
        assert!(matches!(
            engine.dispatch_all().await,
            Err(ReminderError::Store(_))
        ));
    }

    #[tokio::test]
    async fn gateway_failure_keeps_error_detail() {
        let store = StaticStore(vec![record(1, "Ann", 3, 10, 0)]);
        let report = engine(store, RejectingGateway).dispatch_all().await.unwrap();

        assert_eq!(report.failure_count, 1);
        assert_eq!(
            report.items[0].failure_reason.as_deref(),
            Some("gateway transport error: timed out")
        );
        assert_eq!(report.items[0].sent_to.as_deref(), Some("+14155550100"));
    }

    #[tokio::test]
    async fn malformed_contact_is_a_per_candidate_failure() {
        let mut bad = record(1, "Ann", 3, 10, 0);
        bad.owner.contact_address = Some("0801234".to_string());
        let store = StaticStore(vec![bad, record(2, "Ben", 3, 10, 0)]);
        let gateway = Arc::new(CountingGateway::default());
        let engine = ReminderEngine::new(
            Arc::new(store),
            gateway.clone(),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())),
            1,
        );

        assert_eq!(engine.check_pending().await.unwrap().count, 2);

        let report = engine.dispatch_all().await.unwrap();
        assert_eq!(report.total, 2);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.success_count, 1);
        assert_eq!(report.items[0].subject_name, "Ann");
        assert_eq!(
            report.items[0].failure_reason.as_deref(),
            Some("contact address 0801234 is not a valid phone number")
        );
        assert_eq!(report.items[0].sent_to, None);
        assert_eq!(gateway.sends.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_message_requires_address_and_text() {
        let engine = engine(StaticStore(vec![]), LoggingGateway);

        assert!(matches!(
            engine.send_test_message("", "hi").await,
            Err(ReminderError::Validation(ValidationError::MissingField("address")))
        ));
        assert!(matches!(
            engine.send_test_message("+14155550100", " ").await,
            Err(ReminderError::Validation(ValidationError::MissingField("text")))
        ));
        assert!(engine.send_test_message("+14155550100", "hi").await.is_ok());
    }

    #[tokio::test]
    async fn test_message_surfaces_gateway_errors() {
        let engine = engine(StaticStore(vec![]), RejectingGateway);

        assert!(matches!(
            engine.send_test_message("+14155550100", "hi").await,
            Err(ReminderError::Gateway(GatewayError::Transport(_)))
        ));
    }
}
