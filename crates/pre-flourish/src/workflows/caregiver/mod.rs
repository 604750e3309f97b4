//! Caregiver screening and informed consent intake.
//!
//! Screening answers and consent checklists are evaluated by the rule sets in
//! [`eligibility`]; the service stores the derived eligibility on every record it writes.

pub mod domain;
pub mod eligibility;
pub mod identifier;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CaregiverScreening, ConsentChecklist, ConsentFormError, ConsentSubmission, IdentityType,
    RecruitmentChoice, ScreeningIdentifier, SubjectIdentifier, YesNo,
};
pub use eligibility::{
    AgeCitizenChildEligibility, ConsentIneligibility, ConsentQualityEligibility,
    EligibilityResult, IneligibilityReason, ScreeningIneligibility, MAX_AGE_OF_CONSENT,
    MIN_AGE_OF_CONSENT,
};
pub use identifier::{SequentialSubjectIdentifier, SubjectIdentifierAllocator};
pub use repository::{
    ConsentRecord, ConsentRepository, ConsentUniqueKey, ConsentView, RepositoryError,
    ScreeningRecord, ScreeningRepository, ScreeningView, CONSENT_VERSION,
};
pub use router::caregiver_router;
pub use service::{CaregiverConsentService, ConsentServiceError};
