use std::sync::atomic::{AtomicU64, Ordering};

use super::domain::{ScreeningIdentifier, SubjectIdentifier};
use crate::config::StudyConfig;

/// Source of study subject identifiers, consulted once per new consent.
pub trait SubjectIdentifierAllocator: Send + Sync {
    fn next_subject_identifier(&self) -> SubjectIdentifier;
}

/// Allocates `{protocol}-{site}{sequence}` identifiers, e.g. `B142-4000001`.
#[derive(Debug)]
pub struct SequentialSubjectIdentifier {
    protocol_number: String,
    site_id: u16,
    sequence: AtomicU64,
}

impl SequentialSubjectIdentifier {
    pub fn new(study: &StudyConfig) -> Self {
        Self::starting_at(study, 1)
    }

    pub fn starting_at(study: &StudyConfig, first: u64) -> Self {
        Self {
            protocol_number: study.protocol_number.clone(),
            site_id: study.site_id,
            sequence: AtomicU64::new(first),
        }
    }
}

impl SubjectIdentifierAllocator for SequentialSubjectIdentifier {
    fn next_subject_identifier(&self) -> SubjectIdentifier {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        SubjectIdentifier(format!(
            "{}-{:02}{:05}",
            self.protocol_number, self.site_id, sequence
        ))
    }
}

static SCREENING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_screening_identifier() -> ScreeningIdentifier {
    let id = SCREENING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ScreeningIdentifier(format!("S{id:06}"))
}
