use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::ScreeningImportError;
use crate::workflows::caregiver::{CaregiverScreening, ScreeningIdentifier, YesNo};

#[derive(Debug)]
pub(crate) struct ScreeningRow {
    pub(crate) screening_identifier: Option<ScreeningIdentifier>,
    pub(crate) screening: CaregiverScreening,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ScreeningRow>, ScreeningImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let raw: RawScreeningRow = record.deserialize(Some(&headers))?;
        rows.push(raw.into_row(line)?);
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawScreeningRow {
    #[serde(
        rename = "Screening Identifier",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    screening_identifier: Option<String>,
    #[serde(rename = "Age", default)]
    age: String,
    #[serde(rename = "Has Omang", default)]
    has_omang: String,
    #[serde(rename = "Has Child", default)]
    has_child: String,
}

impl RawScreeningRow {
    fn into_row(self, line: u64) -> Result<ScreeningRow, ScreeningImportError> {
        let invalid = |reason: String| ScreeningImportError::InvalidRow { line, reason };

        if self.age.is_empty() {
            return Err(invalid("age is required".to_string()));
        }
        let age_in_years = self
            .age
            .parse::<i32>()
            .map_err(|_| invalid(format!("age '{}' is not a whole number of years", self.age)))?;
        let has_omang = self.has_omang.parse::<YesNo>().map_err(&invalid)?;
        let has_child = self.has_child.parse::<YesNo>().map_err(&invalid)?;

        Ok(ScreeningRow {
            screening_identifier: self.screening_identifier.map(ScreeningIdentifier),
            screening: CaregiverScreening {
                age_in_years,
                has_omang,
                has_child,
            },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
