use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    CaregiverScreening, ConsentFormError, ConsentSubmission, ScreeningIdentifier,
    SubjectIdentifier,
};
use super::eligibility::{AgeCitizenChildEligibility, ConsentQualityEligibility};
use super::identifier::{next_screening_identifier, SubjectIdentifierAllocator};
use super::repository::{
    ConsentRecord, ConsentRepository, RepositoryError, ScreeningRecord, ScreeningRepository,
    CONSENT_VERSION,
};

/// Service composing the eligibility evaluators, repositories, and identifier allocation.
pub struct CaregiverConsentService<S, C> {
    screenings: Arc<S>,
    consents: Arc<C>,
    identifiers: Arc<dyn SubjectIdentifierAllocator>,
}

impl<S, C> CaregiverConsentService<S, C>
where
    S: ScreeningRepository + 'static,
    C: ConsentRepository + 'static,
{
    pub fn new(
        screenings: Arc<S>,
        consents: Arc<C>,
        identifiers: Arc<dyn SubjectIdentifierAllocator>,
    ) -> Self {
        Self {
            screenings,
            consents,
            identifiers,
        }
    }

    /// Evaluate and store a caregiver screening.
    pub fn screen(
        &self,
        screening: CaregiverScreening,
    ) -> Result<ScreeningRecord, ConsentServiceError> {
        let eligibility = AgeCitizenChildEligibility::for_screening(&screening);
        let record = ScreeningRecord {
            screening_identifier: next_screening_identifier(),
            screening,
            is_eligible: eligibility.is_eligible(),
            ineligibility: eligibility.failure_reasons(),
            report_datetime: Utc::now(),
        };

        let stored = self.screenings.insert(record)?;
        info!(
            screening_identifier = %stored.screening_identifier,
            is_eligible = stored.is_eligible,
            "caregiver screening recorded"
        );
        Ok(stored)
    }

    pub fn get_screening(
        &self,
        screening_identifier: &ScreeningIdentifier,
    ) -> Result<ScreeningRecord, ConsentServiceError> {
        let record = self
            .screenings
            .fetch(screening_identifier)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Consent a screened caregiver, allocating a subject identifier.
    ///
    /// The screening must exist and be eligible before a consent is accepted.
    pub fn consent(
        &self,
        submission: ConsentSubmission,
    ) -> Result<ConsentRecord, ConsentServiceError> {
        submission.validate()?;

        let screening = self
            .screenings
            .fetch(&submission.screening_identifier)?
            .ok_or_else(|| {
                ConsentServiceError::ScreeningNotFound(submission.screening_identifier.clone())
            })?;
        if !screening.is_eligible {
            return Err(ConsentServiceError::ScreeningIneligible {
                screening_identifier: screening.screening_identifier,
                reasons: screening.ineligibility,
            });
        }

        let mut record = ConsentRecord {
            subject_identifier: self.identifiers.next_subject_identifier(),
            version: CONSENT_VERSION.to_string(),
            consent_datetime: Utc::now(),
            submission,
            is_eligible: false,
            ineligibility: Vec::new(),
        };
        apply_consent_eligibility(&mut record);

        let stored = self.consents.insert(record)?;
        info!(
            subject_identifier = %stored.subject_identifier,
            is_eligible = stored.is_eligible,
            "caregiver consent recorded"
        );
        Ok(stored)
    }

    /// Persist changes to an existing consent, re-deriving its eligibility.
    pub fn save(&self, mut record: ConsentRecord) -> Result<ConsentRecord, ConsentServiceError> {
        record.submission.validate()?;
        apply_consent_eligibility(&mut record);

        self.consents.update(record.clone())?;
        debug!(
            consent = %record,
            is_eligible = record.is_eligible,
            "caregiver consent re-evaluated"
        );
        Ok(record)
    }

    pub fn get(
        &self,
        subject_identifier: &SubjectIdentifier,
    ) -> Result<ConsentRecord, ConsentServiceError> {
        let record = self
            .consents
            .fetch(subject_identifier, CONSENT_VERSION)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Stamp the consent-quality outcome and form version onto a record about to be written.
fn apply_consent_eligibility(record: &mut ConsentRecord) {
    let eligibility = ConsentQualityEligibility::for_checklist(&record.submission.checklist);
    record.is_eligible = eligibility.is_eligible();
    record.ineligibility = eligibility.failure_reasons();
    record.version = CONSENT_VERSION.to_string();
}

/// Error raised by the caregiver consent service.
#[derive(Debug, thiserror::Error)]
pub enum ConsentServiceError {
    #[error(transparent)]
    Form(#[from] ConsentFormError),
    #[error("screening {0} was not found")]
    ScreeningNotFound(ScreeningIdentifier),
    #[error("screening {screening_identifier} is not eligible: {}", reasons.join("; "))]
    ScreeningIneligible {
        screening_identifier: ScreeningIdentifier,
        reasons: Vec<String>,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
