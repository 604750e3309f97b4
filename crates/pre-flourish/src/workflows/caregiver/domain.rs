use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Answer to a yes/no form question that may not have been answered yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Yes", alias = "yes", alias = "YES")]
    Yes,
    #[serde(rename = "No", alias = "no", alias = "NO")]
    No,
    #[default]
    #[serde(rename = "N/A", alias = "n/a", alias = "unanswered", alias = "")]
    Unanswered,
}

impl YesNo {
    pub const fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
            YesNo::Unanswered => "N/A",
        }
    }

    /// Only an explicit "No" fails a rule; "Yes" and unanswered both pass.
    pub const fn is_no(self) -> bool {
        matches!(self, YesNo::No)
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for YesNo {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(YesNo::Yes),
            "no" | "n" => Ok(YesNo::No),
            "" | "n/a" | "na" | "unanswered" | "unknown" => Ok(YesNo::Unanswered),
            _ => Err(format!("'{raw}' is not one of yes, no or n/a")),
        }
    }
}

/// Identifier assigned when a caregiver is screened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreeningIdentifier(pub String);

impl fmt::Display for ScreeningIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Study-wide subject identifier assigned at consent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectIdentifier(pub String);

impl fmt::Display for SubjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answers captured on the caregiver screening form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaregiverScreening {
    pub age_in_years: i32,
    #[serde(default)]
    pub has_omang: YesNo,
    #[serde(default)]
    pub has_child: YesNo,
}

/// Kind of identity document presented at consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityType {
    CountryId,
    CountryIdReceipt,
    Passport,
    Other,
}

/// Where the caregiver first heard about the study, or where they were recruited.
///
/// `Other` carries no text of its own; the free text lives in the matching
/// `*_other` field on the submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitmentChoice {
    Listed(String),
    Other,
}

impl RecruitmentChoice {
    pub fn is_other(&self) -> bool {
        matches!(self, RecruitmentChoice::Other)
    }
}

/// The five checklist questions answered by the staff member who took consent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentChecklist {
    #[serde(default)]
    pub consent_reviewed: YesNo,
    #[serde(default)]
    pub study_questions: YesNo,
    #[serde(default)]
    pub assessment_score: YesNo,
    #[serde(default)]
    pub consent_signature: YesNo,
    #[serde(default)]
    pub consent_copy: YesNo,
}

impl ConsentChecklist {
    pub const fn all(answer: YesNo) -> Self {
        Self {
            consent_reviewed: answer,
            study_questions: answer,
            assessment_score: answer,
            consent_signature: answer,
            consent_copy: answer,
        }
    }
}

/// Caregiver consent form as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentSubmission {
    pub screening_identifier: ScreeningIdentifier,
    pub first_name: String,
    pub last_name: String,
    pub initials: String,
    pub dob: NaiveDate,
    pub identity: String,
    pub identity_type: IdentityType,
    #[serde(default)]
    pub citizen: YesNo,
    pub recruit_source: RecruitmentChoice,
    #[serde(default)]
    pub recruit_source_other: Option<String>,
    pub recruitment_clinic: RecruitmentChoice,
    #[serde(default)]
    pub recruitment_clinic_other: Option<String>,
    #[serde(flatten)]
    pub checklist: ConsentChecklist,
}

/// Field-level problems that stop a consent form from being saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsentFormError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("initials '{initials}' do not match the participant's first and last name")]
    InitialsMismatch { initials: String },
    #[error("{field} must be specified when 'other' is selected")]
    OtherNotSpecified { field: &'static str },
    #[error("{field} must be left blank unless 'other' is selected")]
    OtherNotApplicable { field: &'static str },
}

impl ConsentSubmission {
    pub fn validate(&self) -> Result<(), ConsentFormError> {
        for (field, value) in [
            ("screening_identifier", self.screening_identifier.0.as_str()),
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("identity", self.identity.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(ConsentFormError::Required { field });
            }
        }

        self.validate_initials()?;
        validate_other(
            &self.recruit_source,
            self.recruit_source_other.as_deref(),
            "recruit_source_other",
        )?;
        validate_other(
            &self.recruitment_clinic,
            self.recruitment_clinic_other.as_deref(),
            "recruitment_clinic_other",
        )
    }

    fn validate_initials(&self) -> Result<(), ConsentFormError> {
        let initials = self.initials.trim();
        let mismatch = || ConsentFormError::InitialsMismatch {
            initials: self.initials.clone(),
        };

        if !(2..=3).contains(&initials.len())
            || !initials.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(mismatch());
        }

        let first = leading_letter(&self.first_name);
        let last = leading_letter(&self.last_name);
        if initials.chars().next() != first || initials.chars().last() != last {
            return Err(mismatch());
        }

        Ok(())
    }
}

fn leading_letter(name: &str) -> Option<char> {
    name.trim().chars().next().map(|c| c.to_ascii_uppercase())
}

fn validate_other(
    choice: &RecruitmentChoice,
    other: Option<&str>,
    field: &'static str,
) -> Result<(), ConsentFormError> {
    let specified = other.map(|text| !text.trim().is_empty()).unwrap_or(false);
    match (choice.is_other(), specified) {
        (true, false) => Err(ConsentFormError::OtherNotSpecified { field }),
        (false, true) => Err(ConsentFormError::OtherNotApplicable { field }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_no_parses_form_and_cli_spellings() {
        assert_eq!("Yes".parse::<YesNo>(), Ok(YesNo::Yes));
        assert_eq!(" n ".parse::<YesNo>(), Ok(YesNo::No));
        assert_eq!("".parse::<YesNo>(), Ok(YesNo::Unanswered));
        assert_eq!("N/A".parse::<YesNo>(), Ok(YesNo::Unanswered));
        assert!("maybe".parse::<YesNo>().is_err());
    }

    #[test]
    fn yes_no_round_trips_edc_labels() {
        let json = serde_json::to_string(&YesNo::No).expect("serializes");
        assert_eq!(json, "\"No\"");
        let parsed: YesNo = serde_json::from_str("\"yes\"").expect("alias accepted");
        assert_eq!(parsed, YesNo::Yes);
    }

    #[test]
    fn only_explicit_no_counts_as_no() {
        assert!(YesNo::No.is_no());
        assert!(!YesNo::Yes.is_no());
        assert!(!YesNo::Unanswered.is_no());
    }

    #[test]
    fn screening_accepts_any_integer_age() {
        let young: CaregiverScreening =
            serde_json::from_str(r#"{ "age_in_years": -1 }"#).expect("negative age parses");
        assert_eq!(young.age_in_years, -1);
        let old: CaregiverScreening =
            serde_json::from_str(r#"{ "age_in_years": 300, "has_omang": "Yes" }"#)
                .expect("large age parses");
        assert_eq!(old.age_in_years, 300);
        assert!(serde_json::from_str::<CaregiverScreening>(r#"{ "has_omang": "Yes" }"#).is_err());
    }

    #[test]
    fn missing_checklist_answers_default_to_unanswered() {
        let checklist: ConsentChecklist =
            serde_json::from_str(r#"{ "consent_reviewed": "Yes" }"#).expect("parses");
        assert_eq!(checklist.consent_reviewed, YesNo::Yes);
        assert_eq!(checklist.consent_copy, YesNo::Unanswered);
    }
}
