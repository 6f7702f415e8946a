//! Candidate - 今回の呼び出しで通知対象になった subject
//!
//! 永続化されません。1 回の呼び出しの間だけ存在します。

use serde::{Deserialize, Serialize};

use super::subject::{OwnerContact, ReminderSubject};

/// Whether the reminder is for the day itself or ahead of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Today,
    Upcoming,
}

impl ReminderKind {
    pub fn for_days(days_until: u32) -> Self {
        if days_until == 0 {
            ReminderKind::Today
        } else {
            ReminderKind::Upcoming
        }
    }
}

/// A subject that is due for a reminder on this invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderCandidate {
    pub subject: ReminderSubject,
    pub owner: OwnerContact,
    pub days_until: u32,
    pub kind: ReminderKind,
}

impl ReminderCandidate {
    pub fn new(subject: ReminderSubject, owner: OwnerContact, days_until: u32) -> Self {
        Self {
            subject,
            owner,
            days_until,
            kind: ReminderKind::for_days(days_until),
        }
    }
}
