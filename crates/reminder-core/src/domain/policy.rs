//! Reminder policy: decides whether a days-until value triggers a reminder.
//!
//! This is a pure function. A reminder fires on the occurrence day itself and
//! on exactly one configured day before it; missed days are not caught up.

use super::occurrence::NotifyBefore;

/// `true` when a reminder is due `days_until` days before the occurrence.
pub fn should_fire(days_until: u32, notify_before: NotifyBefore) -> bool {
    days_until == 0 || days_until == notify_before.days()
}
