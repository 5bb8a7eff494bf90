//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod application_attempt;
mod event_log;
mod outbox;
mod vacancy;

pub use application_attempt::{ApplicationAttempt, IP_HASH_HEX_LENGTH, IpHash};
pub use event_log::EventLogAction;
pub use outbox::{OutboxEvent, OutboxEventId, OutboxEventInput, OutboxStatus};
pub use vacancy::{VacancyId, VacancyViewCount};
