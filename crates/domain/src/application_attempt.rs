//! Application attempt audit records used for duplicate suppression.

use chrono::{DateTime, Utc};
use jobboard_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::VacancyId;

/// Length of a hex-encoded SHA-256 digest.
pub const IP_HASH_HEX_LENGTH: usize = 64;

/// Fixed-length digest of a caller address plus secret salt.
///
/// The raw address is never stored; only this lowercase hex digest is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpHash(String);

impl IpHash {
    /// Creates an IP hash from a lowercase hex SHA-256 digest.
    pub fn from_hex(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();

        if value.len() != IP_HASH_HEX_LENGTH {
            return Err(AppError::Validation(format!(
                "ip hash must be {IP_HASH_HEX_LENGTH} hex characters, got {}",
                value.len()
            )));
        }

        if !value
            .chars()
            .all(|character| matches!(character, '0'..='9' | 'a'..='f'))
        {
            return Err(AppError::Validation(
                "ip hash must contain only lowercase hex characters".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Immutable audit entry describing one application attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationAttempt {
    vacancy_id: VacancyId,
    ip_hash: IpHash,
    user_agent: Option<String>,
    session_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl ApplicationAttempt {
    /// Creates an attempt record. Blank optional fields are dropped.
    #[must_use]
    pub fn new(
        vacancy_id: VacancyId,
        ip_hash: IpHash,
        user_agent: Option<String>,
        session_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            vacancy_id,
            ip_hash,
            user_agent: non_blank(user_agent),
            session_id: non_blank(session_id),
            created_at,
        }
    }

    /// Returns the targeted vacancy.
    #[must_use]
    pub fn vacancy_id(&self) -> &VacancyId {
        &self.vacancy_id
    }

    /// Returns the caller fingerprint.
    #[must_use]
    pub fn ip_hash(&self) -> &IpHash {
        &self.ip_hash
    }

    /// Returns the informational user agent.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns the informational client session token.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns when the attempt happened.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
