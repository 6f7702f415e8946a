//! Errors - エラー型と分類
//!
//! 伝播ポリシー:
//! - `StoreError` は呼び出し全体を失敗させる（部分的なバッチは実行しない）
//! - `ValidationError` は該当 subject をスキップしてログに残す
//! - `GatewayError` と連絡先の欠落・不正は候補ごとの失敗として結果に記録する

use thiserror::Error;

/// A stored record or operator input that does not satisfy the domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid occurrence date: month={month} day={day}")]
    InvalidOccurrence { month: u32, day: u32 },

    #[error("notify_before_days must be one of 0, 1 or 7 (got {0})")]
    InvalidNotifyBefore(i64),

    #[error("display name must not be empty")]
    EmptyName,

    #[error("display name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("message template exceeds {max} characters")]
    TemplateTooLong { max: usize },

    #[error("{0} is not a valid contact address")]
    InvalidAddress(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Failure reported by the Messaging Gateway for one send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("gateway rejected message: status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("gateway transport error: {0}")]
    Transport(String),

    #[error("gateway misconfigured: {0}")]
    Config(String),
}

/// Why a candidate has no usable contact address. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("contact address not found")]
    MissingContact,

    #[error("contact address {0} is not a valid phone number")]
    InvalidContact(String),
}

/// The Birthday Store could not serve the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("birthday store unavailable: {0}")]
    Unavailable(String),

    #[error("birthday store returned unreadable data: {0}")]
    Corrupt(String),
}

/// Top-level error of an engine invocation.
#[derive(Debug, Error)]
pub enum ReminderError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_surfaces_through_reminder_error() {
        let err: ReminderError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, ReminderError::Store(StoreError::Unavailable(_))));
        assert_eq!(
            err.to_string(),
            "birthday store unavailable: connection refused"
        );
    }

    #[test]
    fn invalid_contact_names_the_stored_address() {
        let err = DispatchError::InvalidContact("0801234".into());
        assert_eq!(
            err.to_string(),
            "contact address 0801234 is not a valid phone number"
        );
    }

    #[test]
    fn gateway_error_keeps_status_and_body() {
        let err = GatewayError::Rejected {
            status: 400,
            body: "invalid recipient".into(),
        };
        assert_eq!(
            err.to_string(),
            "gateway rejected message: status 400: invalid recipient"
        );
    }
}
