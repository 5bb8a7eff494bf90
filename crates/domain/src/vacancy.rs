use jobboard_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a vacancy posting.
///
/// Vacancies are owned by the hosted backend, so the identifier is kept as a
/// trimmed, non-blank string rather than parsed into a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VacancyId(NonEmptyString);

impl VacancyId {
    /// Creates a validated vacancy identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        NonEmptyString::new(value.trim()).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for VacancyId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Current view counter for one vacancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyViewCount {
    /// Counted vacancy.
    pub vacancy_id: VacancyId,
    /// Total number of recorded views.
    pub view_count: i64,
}

#[cfg(test)]
mod tests {
    use super::VacancyId;

    #[test]
    fn vacancy_id_is_trimmed() {
        let vacancy_id = VacancyId::new("  vac-42 ");
        assert_eq!(
            vacancy_id.map(|value| value.as_str().to_owned()).ok(),
            Some("vac-42".to_owned())
        );
    }

    #[test]
    fn blank_vacancy_id_is_rejected() {
        assert!(VacancyId::new("").is_err());
        assert!(VacancyId::new(" \t ").is_err());
    }
}
