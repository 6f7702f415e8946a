//! Subject - 誕生日を追跡される人と、その所有ユーザーの連絡先
//!
//! ストアが返すのは未検証の `SubjectRecord` です。
//! `SubjectRecord::validate` がドメイン不変条件の境界になります。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::errors::{DispatchError, ValidationError};
use super::ids::{OwnerId, SubjectId};
use super::occurrence::{NotifyBefore, OccurrenceDate};

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_TEMPLATE_LEN: usize = 200;
pub const DEFAULT_TEMPLATE: &str = "Happy Birthday, {name}! 🎉";
pub const NAME_PLACEHOLDER: &str = "{name}";

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("static pattern"));

/// E.164-like address: leading `+`, then 2 to 15 digits, the first non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactAddress(String);

impl ContactAddress {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if ADDRESS_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidAddress(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A tracked person whose birthday the owner wants to be reminded of.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSubject {
    pub id: SubjectId,
    pub owner_id: OwnerId,
    pub display_name: String,
    pub occurrence: OccurrenceDate,
    pub notify_before: NotifyBefore,
    pub reminder_enabled: bool,
    pub message_template: String,
}

/// The user who receives the reminder.
///
/// The address is kept as stored; it is checked per candidate by
/// [`OwnerContact::address`] so a bad address fails only that reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerContact {
    pub id: OwnerId,
    pub contact_address: Option<String>,
}

impl OwnerContact {
    pub fn address(&self) -> Result<ContactAddress, DispatchError> {
        let raw = self
            .contact_address
            .as_deref()
            .ok_or(DispatchError::MissingContact)?;
        ContactAddress::parse(raw).map_err(|_| DispatchError::InvalidContact(raw.to_string()))
    }
}

/// Raw owner row as joined by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub id: OwnerId,
    #[serde(default)]
    pub contact_address: Option<String>,
}

/// Raw subject row as persisted, joined with its owner.
///
/// Nothing here is trusted; see [`SubjectRecord::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: SubjectId,
    pub name: String,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub notify_before_days: i64,
    #[serde(default = "default_enabled")]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub message_template: Option<String>,
    pub owner: OwnerRecord,
}

fn default_enabled() -> bool {
    true
}

impl SubjectRecord {
    /// Converts the raw row into domain types.
    ///
    /// A blank owner address is treated as missing. The address shape is
    /// not checked here.
    pub fn validate(&self) -> Result<(ReminderSubject, OwnerContact), ValidationError> {
        let display_name = self.name.trim();
        if display_name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if display_name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong { max: MAX_NAME_LEN });
        }

        let message_template = match self.message_template.as_deref() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => DEFAULT_TEMPLATE.to_string(),
        };
        if message_template.chars().count() > MAX_TEMPLATE_LEN {
            return Err(ValidationError::TemplateTooLong {
                max: MAX_TEMPLATE_LEN,
            });
        }

        let contact_address = self
            .owner
            .contact_address
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(str::to_string);

        let subject = ReminderSubject {
            id: self.id,
            owner_id: self.owner.id,
            display_name: display_name.to_string(),
            occurrence: OccurrenceDate::new(self.month, self.day)?,
            notify_before: NotifyBefore::try_from(self.notify_before_days)?,
            reminder_enabled: self.reminder_enabled,
            message_template,
        };
        let owner = OwnerContact {
            id: self.owner.id,
            contact_address,
        };
        Ok((subject, owner))
    }
}
