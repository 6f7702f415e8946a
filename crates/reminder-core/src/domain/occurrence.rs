//! Occurrence - 毎年繰り返す日付と通知オフセット
//!
//! - `OccurrenceDate`: 月日のみ（年は無視）
//! - `NotifyBefore`: 0 / 1 / 7 日前の閉じた列挙型

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ValidationError;

/// Month/day of a yearly-recurring event.
///
/// Feb 29 is accepted. In a non-leap year it is observed on Feb 28
/// (see [`OccurrenceDate::in_year`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct OccurrenceDate {
    month: u32,
    day: u32,
}

impl OccurrenceDate {
    pub fn new(month: u32, day: u32) -> Result<Self, ValidationError> {
        // 2000 はうるう年なので Feb 29 も通る
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| Self { month, day })
            .ok_or(ValidationError::InvalidOccurrence { month, day })
    }

    /// Takes month and day of a full date; the year is dropped.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// Projects this occurrence onto `year`.
    pub fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).filter(|_| self.is_leap_day()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for OccurrenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for OccurrenceDate {
    type Err = ValidationError;

    /// Accepts `MM-DD` or a full `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        let invalid = ValidationError::InvalidOccurrence { month: 0, day: 0 };
        let (month, day) = s.split_once('-').ok_or(invalid.clone())?;
        let month = month.parse().map_err(|_| invalid.clone())?;
        let day = day.parse().map_err(|_| invalid)?;
        Self::new(month, day)
    }
}

impl From<OccurrenceDate> for String {
    fn from(value: OccurrenceDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for OccurrenceDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How many days before the occurrence the owner wants to be reminded.
///
/// The occurrence day itself always fires regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum NotifyBefore {
    #[default]
    SameDay,
    OneDay,
    OneWeek,
}

impl NotifyBefore {
    pub fn days(self) -> u32 {
        match self {
            NotifyBefore::SameDay => 0,
            NotifyBefore::OneDay => 1,
            NotifyBefore::OneWeek => 7,
        }
    }
}

impl TryFrom<i64> for NotifyBefore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NotifyBefore::SameDay),
            1 => Ok(NotifyBefore::OneDay),
            7 => Ok(NotifyBefore::OneWeek),
            other => Err(ValidationError::InvalidNotifyBefore(other)),
        }
    }
}

impl From<NotifyBefore> for i64 {
    fn from(value: NotifyBefore) -> Self {
        i64::from(value.days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1)]
    #[case(2, 29)]
    #[case(12, 31)]
    fn valid_occurrences_are_accepted(#[case] month: u32, #[case] day: u32) {
        let occurrence = OccurrenceDate::new(month, day).unwrap();
        assert_eq!((occurrence.month(), occurrence.day()), (month, day));
    }

    #[rstest]
    #[case(0, 10)]
    #[case(13, 1)]
    #[case(2, 30)]
    #[case(4, 31)]
    fn invalid_occurrences_are_rejected(#[case] month: u32, #[case] day: u32) {
        assert_eq!(
            OccurrenceDate::new(month, day),
            Err(ValidationError::InvalidOccurrence { month, day })
        );
    }

    #[test]
    fn leap_day_is_observed_on_feb_28_in_common_years() {
        let leap_day = OccurrenceDate::new(2, 29).unwrap();

        assert_eq!(leap_day.in_year(2028), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
        assert_eq!(leap_day.in_year(2027), NaiveDate::from_ymd_opt(2027, 2, 28).unwrap());
    }

    #[test]
    fn parses_short_and_full_forms() {
        let short: OccurrenceDate = "03-10".parse().unwrap();
        let full: OccurrenceDate = "1990-03-10".parse().unwrap();

        assert_eq!(short, full);
        assert_eq!(short.to_string(), "03-10");
        assert!("03/10".parse::<OccurrenceDate>().is_err());
    }

    #[rstest]
    #[case(0, NotifyBefore::SameDay)]
    #[case(1, NotifyBefore::OneDay)]
    #[case(7, NotifyBefore::OneWeek)]
    fn notify_before_accepts_the_fixed_set(#[case] raw: i64, #[case] expected: NotifyBefore) {
        assert_eq!(NotifyBefore::try_from(raw), Ok(expected));
        assert_eq!(i64::from(expected), raw);
    }

    #[rstest]
    #[case(-1)]
    #[case(2)]
    #[case(3)]
    #[case(30)]
    fn notify_before_rejects_other_values(#[case] raw: i64) {
        assert_eq!(
            NotifyBefore::try_from(raw),
            Err(ValidationError::InvalidNotifyBefore(raw))
        );
    }

    #[test]
    fn notify_before_serializes_as_number() {
        assert_eq!(serde_json::to_string(&NotifyBefore::OneWeek).unwrap(), "7");
        assert!(serde_json::from_str::<NotifyBefore>("5").is_err());
    }
}
