//! Annual recurrence date math.

use chrono::{Datelike, NaiveDate};

use super::occurrence::OccurrenceDate;

/// Days from `today` until the next time `occurrence` comes around.
///
/// The occurrence is projected onto today's year, and onto the following
/// year if that projection is already behind `today`. Comparison is on
/// dates only, so a matching month/day yields exactly 0.
pub fn days_until_next_occurrence(occurrence: OccurrenceDate, today: NaiveDate) -> u32 {
    let mut next = occurrence.in_year(today.year());
    if next < today {
        next = occurrence.in_year(today.year() + 1);
    }
    u32::try_from((next - today).num_days()).unwrap_or(0)
}
