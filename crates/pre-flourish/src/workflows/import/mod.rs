//! Batch screening from CSV exports of the paper screening log.

mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::workflows::caregiver::{
    AgeCitizenChildEligibility, CaregiverScreening, EligibilityResult, ScreeningIdentifier,
    ScreeningIneligibility,
};

#[derive(Debug)]
pub enum ScreeningImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for ScreeningImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreeningImportError::Io(err) => write!(f, "failed to read screening export: {}", err),
            ScreeningImportError::Csv(err) => write!(f, "invalid screening CSV data: {}", err),
            ScreeningImportError::InvalidRow { line, reason } => {
                write!(f, "screening export line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for ScreeningImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreeningImportError::Io(err) => Some(err),
            ScreeningImportError::Csv(err) => Some(err),
            ScreeningImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ScreeningImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScreeningImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One evaluated row of a screening export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedScreening {
    pub screening_identifier: Option<ScreeningIdentifier>,
    pub screening: CaregiverScreening,
    pub eligibility: EligibilityResult<ScreeningIneligibility>,
}

pub struct ScreeningImporter;

impl ScreeningImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ImportedScreening>, ScreeningImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Evaluate every row, preserving file order. The first malformed row aborts the import.
    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<ImportedScreening>, ScreeningImportError> {
        let rows = parser::parse_rows(reader)?;

        Ok(rows
            .into_iter()
            .map(|row| ImportedScreening {
                eligibility: AgeCitizenChildEligibility::for_screening(&row.screening),
                screening_identifier: row.screening_identifier,
                screening: row.screening,
            })
            .collect())
    }
}
