use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CaregiverScreening, ConsentSubmission, ScreeningIdentifier, SubjectIdentifier};

/// Consent form version stamped on every saved record.
pub const CONSENT_VERSION: &str = "1";

/// Stored screening with its derived eligibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub screening_identifier: ScreeningIdentifier,
    pub screening: CaregiverScreening,
    pub is_eligible: bool,
    pub ineligibility: Vec<String>,
    pub report_datetime: DateTime<Utc>,
}

impl ScreeningRecord {
    pub fn view(&self) -> ScreeningView {
        ScreeningView {
            screening_identifier: self.screening_identifier.clone(),
            age_in_years: self.screening.age_in_years,
            is_eligible: self.is_eligible,
            ineligibility: self.ineligibility.clone(),
        }
    }
}

/// Stored caregiver consent with the consent-quality outcome applied on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub subject_identifier: SubjectIdentifier,
    pub version: String,
    pub consent_datetime: DateTime<Utc>,
    pub submission: ConsentSubmission,
    pub is_eligible: bool,
    pub ineligibility: Vec<String>,
}

impl ConsentRecord {
    pub fn natural_key(&self) -> (SubjectIdentifier, String) {
        (self.subject_identifier.clone(), self.version.clone())
    }

    /// Keys a repository must keep unique across stored consents.
    pub fn unique_keys(&self) -> [ConsentUniqueKey; 3] {
        [
            ConsentUniqueKey::Subject {
                subject_identifier: self.subject_identifier.clone(),
                version: self.version.clone(),
            },
            ConsentUniqueKey::SubjectScreening {
                subject_identifier: self.subject_identifier.clone(),
                screening_identifier: self.submission.screening_identifier.clone(),
                version: self.version.clone(),
            },
            ConsentUniqueKey::Person {
                first_name: self.submission.first_name.trim().to_ascii_uppercase(),
                dob: self.submission.dob,
                initials: self.submission.initials.trim().to_ascii_uppercase(),
                version: self.version.clone(),
            },
        ]
    }

    pub fn view(&self) -> ConsentView {
        ConsentView {
            subject_identifier: self.subject_identifier.clone(),
            screening_identifier: self.submission.screening_identifier.clone(),
            version: self.version.clone(),
            is_eligible: self.is_eligible,
            ineligibility: self.ineligibility.clone(),
        }
    }
}

impl fmt::Display for ConsentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} V{}", self.subject_identifier, self.version)
    }
}

/// One of the uniqueness constraints on caregiver consents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConsentUniqueKey {
    Subject {
        subject_identifier: SubjectIdentifier,
        version: String,
    },
    SubjectScreening {
        subject_identifier: SubjectIdentifier,
        screening_identifier: ScreeningIdentifier,
        version: String,
    },
    Person {
        first_name: String,
        dob: NaiveDate,
        initials: String,
        version: String,
    },
}

impl ConsentUniqueKey {
    pub fn constraint(&self) -> &'static str {
        match self {
            ConsentUniqueKey::Subject { .. } => "subject_identifier, version",
            ConsentUniqueKey::SubjectScreening { .. } => {
                "subject_identifier, screening_identifier, version"
            }
            ConsentUniqueKey::Person { .. } => "first_name, dob, initials, version",
        }
    }
}

/// Storage for screening records.
pub trait ScreeningRepository: Send + Sync {
    fn insert(&self, record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError>;
    fn fetch(&self, id: &ScreeningIdentifier) -> Result<Option<ScreeningRecord>, RepositoryError>;
}

/// Storage for consent records. Implementations enforce `ConsentRecord::unique_keys`.
pub trait ConsentRepository: Send + Sync {
    fn insert(&self, record: ConsentRecord) -> Result<ConsentRecord, RepositoryError>;
    fn update(&self, record: ConsentRecord) -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        subject_identifier: &SubjectIdentifier,
        version: &str,
    ) -> Result<Option<ConsentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record violates unique constraint ({0})")]
    Conflict(&'static str),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public status of a screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningView {
    pub screening_identifier: ScreeningIdentifier,
    pub age_in_years: i32,
    pub is_eligible: bool,
    pub ineligibility: Vec<String>,
}

/// Public status of a consent, without personal fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentView {
    pub subject_identifier: SubjectIdentifier,
    pub screening_identifier: ScreeningIdentifier,
    pub version: String,
    pub is_eligible: bool,
    pub ineligibility: Vec<String>,
}
