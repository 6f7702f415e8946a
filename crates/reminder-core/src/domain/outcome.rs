//! Outcome model: per-candidate dispatch results and invocation summaries.
//!
//! These are the shapes returned to the invoking boundary (scheduler, operator
//! CLI). Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::{ReminderCandidate, ReminderKind};
use super::ids::SubjectId;
use super::occurrence::OccurrenceDate;

/// Whatever the gateway answered on success, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(pub serde_json::Value);

impl Receipt {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Failure,
}

/// Result of dispatching one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub kind: ReminderKind,
    pub outcome: OutcomeKind,

    /// Address the send was attempted to, if one was attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
}

impl DispatchResult {
    pub fn success(candidate: &ReminderCandidate, sent_to: &str, receipt: Receipt) -> Self {
        Self {
            subject_id: candidate.subject.id,
            subject_name: candidate.subject.display_name.clone(),
            kind: candidate.kind,
            outcome: OutcomeKind::Success,
            sent_to: Some(sent_to.to_string()),
            failure_reason: None,
            receipt: Some(receipt),
        }
    }

    pub fn failure(
        candidate: &ReminderCandidate,
        sent_to: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: candidate.subject.id,
            subject_name: candidate.subject.display_name.clone(),
            kind: candidate.kind,
            outcome: OutcomeKind::Failure,
            sent_to: sent_to.map(str::to_string),
            failure_reason: Some(reason.into()),
            receipt: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == OutcomeKind::Success
    }
}

/// One line of the pending-reminders listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingItem {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub days_until: u32,
    pub kind: ReminderKind,
    pub occurrence_date: OccurrenceDate,
}

impl From<&ReminderCandidate> for PendingItem {
    fn from(candidate: &ReminderCandidate) -> Self {
        Self {
            subject_id: candidate.subject.id,
            subject_name: candidate.subject.display_name.clone(),
            days_until: candidate.days_until,
            kind: candidate.kind,
            occurrence_date: candidate.subject.occurrence,
        }
    }
}

/// Output of `check_pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReport {
    pub checked_at: DateTime<Utc>,
    pub count: usize,
    pub items: Vec<PendingItem>,
}

impl PendingReport {
    pub fn new(checked_at: DateTime<Utc>, candidates: &[ReminderCandidate]) -> Self {
        Self {
            checked_at,
            count: candidates.len(),
            items: candidates.iter().map(PendingItem::from).collect(),
        }
    }
}

/// Output of `dispatch_all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub checked_at: DateTime<Utc>,
    pub total: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub items: Vec<DispatchResult>,
}

impl DispatchReport {
    pub fn new(checked_at: DateTime<Utc>, items: Vec<DispatchResult>) -> Self {
        let success_count = items.iter().filter(|r| r.is_success()).count();
        Self {
            checked_at,
            total: items.len(),
            success_count,
            failure_count: items.len() - success_count,
            items,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &DispatchResult> {
        self.items.iter().filter(|r| !r.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::OwnerId;
    use crate::domain::occurrence::NotifyBefore;
    use crate::domain::subject::{OwnerContact, ReminderSubject};
    use ulid::Ulid;

    fn candidate(days_until: u32) -> ReminderCandidate {
        let owner_id = OwnerId::from_ulid(Ulid::new());
        ReminderCandidate::new(
            ReminderSubject {
                id: SubjectId::from_ulid(Ulid::new()),
                owner_id,
                display_name: "Ann".to_string(),
                occurrence: OccurrenceDate::new(3, 17).unwrap(),
                notify_before: NotifyBefore::OneWeek,
                reminder_enabled: true,
                message_template: "Happy Birthday, {name}!".to_string(),
            },
            OwnerContact {
                id: owner_id,
                contact_address: None,
            },
            days_until,
        )
    }

    #[test]
    fn report_counts_successes_and_failures() {
        let c = candidate(7);
        let items = vec![
            DispatchResult::success(&c, "+14155550100", Receipt::new(serde_json::json!({"id": 1}))),
            DispatchResult::failure(&c, None, "contact address not found"),
            DispatchResult::failure(&c, Some("+14155550100"), "timeout"),
        ];

        let report = DispatchReport::new(Utc::now(), items);
        assert_eq!(report.total, 3);
        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 2);
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn failure_result_omits_receipt_in_json() {
        let c = candidate(7);
        let result = DispatchResult::failure(&c, None, "contact address not found");

        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["outcome"], "failure");
        assert_eq!(v["kind"], "upcoming");
        assert_eq!(v["failure_reason"], "contact address not found");
        assert!(v.get("receipt").is_none());
        assert!(v.get("sent_to").is_none());
    }

    #[test]
    fn pending_item_carries_occurrence_as_month_day() {
        let c = candidate(7);
        let report = PendingReport::new(Utc::now(), std::slice::from_ref(&c));

        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["count"], 1);
        assert_eq!(v["items"][0]["occurrence_date"], "03-17");
        assert_eq!(v["items"][0]["days_until"], 7);
    }
}
