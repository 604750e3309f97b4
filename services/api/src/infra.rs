use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use pre_flourish::workflows::caregiver::{
    ConsentRecord, ConsentRepository, ConsentUniqueKey, RepositoryError, ScreeningIdentifier,
    ScreeningRecord, ScreeningRepository, SubjectIdentifier,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScreeningRepository {
    records: Arc<Mutex<HashMap<ScreeningIdentifier, ScreeningRecord>>>,
}

impl ScreeningRepository for InMemoryScreeningRepository {
    fn insert(&self, record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.screening_identifier) {
            return Err(RepositoryError::Conflict("screening_identifier"));
        }
        guard.insert(record.screening_identifier.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ScreeningIdentifier) -> Result<Option<ScreeningRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
}

#[derive(Default)]
struct ConsentTable {
    records: HashMap<(SubjectIdentifier, String), ConsentRecord>,
    unique_keys: HashSet<ConsentUniqueKey>,
}

/// Consent store that enforces the natural-key uniqueness constraints.
#[derive(Default, Clone)]
pub(crate) struct InMemoryConsentRepository {
    table: Arc<Mutex<ConsentTable>>,
}

impl ConsentRepository for InMemoryConsentRepository {
    fn insert(&self, record: ConsentRecord) -> Result<ConsentRecord, RepositoryError> {
        let mut table = self.table.lock().map_err(poisoned)?;
        let keys = record.unique_keys();
        if let Some(key) = keys.iter().find(|key| table.unique_keys.contains(*key)) {
            return Err(RepositoryError::Conflict(key.constraint()));
        }
        table.unique_keys.extend(keys);
        table.records.insert(record.natural_key(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ConsentRecord) -> Result<(), RepositoryError> {
        let mut table = self.table.lock().map_err(poisoned)?;
        let previous = table
            .records
            .get(&record.natural_key())
            .map(ConsentRecord::unique_keys)
            .ok_or(RepositoryError::NotFound)?;

        for key in &previous {
            table.unique_keys.remove(key);
        }
        let keys = record.unique_keys();
        if let Some(key) = keys.iter().find(|key| table.unique_keys.contains(*key)) {
            let constraint = key.constraint();
            table.unique_keys.extend(previous);
            return Err(RepositoryError::Conflict(constraint));
        }

        table.unique_keys.extend(keys);
        table.records.insert(record.natural_key(), record);
        Ok(())
    }

    fn fetch(
        &self,
        subject_identifier: &SubjectIdentifier,
        version: &str,
    ) -> Result<Option<ConsentRecord>, RepositoryError> {
        let table = self.table.lock().map_err(poisoned)?;
        Ok(table
            .records
            .get(&(subject_identifier.clone(), version.to_string()))
            .cloned())
    }
}
