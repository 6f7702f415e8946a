//! Domain model (IDs, subjects, date math, policy, outcomes, ...).
//!
//! 副作用のない部分だけを置きます。ストアや送信は ports 側です。

pub mod calendar;
pub mod candidate;
pub mod errors;
pub mod ids;
pub mod message;
pub mod occurrence;
pub mod outcome;
pub mod policy;
pub mod subject;

pub use calendar::days_until_next_occurrence;
pub use candidate::{ReminderCandidate, ReminderKind};
pub use errors::{DispatchError, GatewayError, ReminderError, StoreError, ValidationError};
pub use ids::{OwnerId, SubjectId};
pub use occurrence::{NotifyBefore, OccurrenceDate};
pub use outcome::{
    DispatchReport, DispatchResult, OutcomeKind, PendingItem, PendingReport, Receipt,
};
pub use policy::should_fire;
pub use subject::{ContactAddress, OwnerContact, OwnerRecord, ReminderSubject, SubjectRecord};
