use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::StudyConfig;
use crate::workflows::caregiver::domain::{
    CaregiverScreening, ConsentChecklist, ConsentSubmission, IdentityType, RecruitmentChoice,
    ScreeningIdentifier, SubjectIdentifier, YesNo,
};
use crate::workflows::caregiver::identifier::SequentialSubjectIdentifier;
use crate::workflows::caregiver::repository::{
    ConsentRecord, ConsentRepository, ConsentUniqueKey, RepositoryError, ScreeningRecord,
    ScreeningRepository,
};
use crate::workflows::caregiver::{caregiver_router, CaregiverConsentService};

pub(super) fn eligible_screening() -> CaregiverScreening {
    CaregiverScreening {
        age_in_years: 32,
        has_omang: YesNo::Yes,
        has_child: YesNo::Yes,
    }
}

pub(super) fn ineligible_screening() -> CaregiverScreening {
    CaregiverScreening {
        age_in_years: 16,
        has_omang: YesNo::No,
        has_child: YesNo::Yes,
    }
}

pub(super) fn consent_submission(screening_identifier: &ScreeningIdentifier) -> ConsentSubmission {
    ConsentSubmission {
        screening_identifier: screening_identifier.clone(),
        first_name: "Kagiso".to_string(),
        last_name: "Molefe".to_string(),
        initials: "KM".to_string(),
        dob: NaiveDate::from_ymd_opt(1992, 4, 17).expect("valid dob"),
        identity: "317918515".to_string(),
        identity_type: IdentityType::CountryId,
        citizen: YesNo::Yes,
        recruit_source: RecruitmentChoice::Listed("Prior BHP study".to_string()),
        recruit_source_other: None,
        recruitment_clinic: RecruitmentChoice::Listed("Princess Marina Hospital".to_string()),
        recruitment_clinic_other: None,
        checklist: ConsentChecklist::all(YesNo::Yes),
    }
}

pub(super) type TestService = CaregiverConsentService<MemoryScreenings, MemoryConsents>;

pub(super) fn build_service() -> (TestService, Arc<MemoryScreenings>, Arc<MemoryConsents>) {
    let screenings = Arc::new(MemoryScreenings::default());
    let consents = Arc::new(MemoryConsents::default());
    let identifiers = Arc::new(SequentialSubjectIdentifier::new(&StudyConfig::default()));
    let service = CaregiverConsentService::new(screenings.clone(), consents.clone(), identifiers);
    (service, screenings, consents)
}

/// Service with an eligible screening already on file.
pub(super) fn service_with_screening() -> (TestService, Arc<MemoryConsents>, ScreeningIdentifier)
{
    let (service, _, consents) = build_service();
    let record = service
        .screen(eligible_screening())
        .expect("screening succeeds");
    (service, consents, record.screening_identifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryScreenings {
    records: Arc<Mutex<HashMap<ScreeningIdentifier, ScreeningRecord>>>,
}

impl ScreeningRepository for MemoryScreenings {
    fn insert(&self, record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.screening_identifier) {
            return Err(RepositoryError::Conflict("screening_identifier"));
        }
        guard.insert(record.screening_identifier.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ScreeningIdentifier) -> Result<Option<ScreeningRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryConsents {
    records: Arc<Mutex<HashMap<(SubjectIdentifier, String), ConsentRecord>>>,
}

impl MemoryConsents {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ConsentRepository for MemoryConsents {
    fn insert(&self, record: ConsentRecord) -> Result<ConsentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let taken: HashSet<ConsentUniqueKey> =
            guard.values().flat_map(|stored| stored.unique_keys()).collect();
        if let Some(key) = record.unique_keys().iter().find(|key| taken.contains(key)) {
            return Err(RepositoryError::Conflict(key.constraint()));
        }
        guard.insert(record.natural_key(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ConsentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.natural_key()) {
            Some(stored) => {
                *stored = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(
        &self,
        subject_identifier: &SubjectIdentifier,
        version: &str,
    ) -> Result<Option<ConsentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(&(subject_identifier.clone(), version.to_string()))
            .cloned())
    }
}

pub(super) struct UnavailableConsents;

impl ConsentRepository for UnavailableConsents {
    fn insert(&self, _record: ConsentRecord) -> Result<ConsentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ConsentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _subject_identifier: &SubjectIdentifier,
        _version: &str,
    ) -> Result<Option<ConsentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    caregiver_router(Arc::new(service))
}
