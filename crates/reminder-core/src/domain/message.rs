//! Message text for a reminder.

use super::candidate::{ReminderCandidate, ReminderKind};
use super::subject::NAME_PLACEHOLDER;

/// Substitutes every `{name}` in `template`.
pub fn render_template(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

/// Fixed wording for an advance reminder.
pub fn upcoming_phrase(name: &str, days_until: u32) -> String {
    match days_until {
        0 => format!("🎉 Today is {name}'s birthday! Don't forget to send your wishes!"),
        1 => format!("📅 Tomorrow is {name}'s birthday! Get ready to celebrate!"),
        n => format!("📅 {name}'s birthday is in {n} days! Mark your calendar!"),
    }
}

/// Text sent for `candidate`: the owner's own template on the day itself,
/// a fixed phrase before it.
pub fn compose(candidate: &ReminderCandidate) -> String {
    let subject = &candidate.subject;
    match candidate.kind {
        ReminderKind::Today => render_template(&subject.message_template, &subject.display_name),
        ReminderKind::Upcoming => upcoming_phrase(&subject.display_name, candidate.days_until),
    }
}
