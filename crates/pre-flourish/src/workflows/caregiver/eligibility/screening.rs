use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check, EligibilityResult, IneligibilityReason};
use crate::workflows::caregiver::domain::{CaregiverScreening, YesNo};

/// Youngest caregiver age accepted at screening (inclusive).
pub const MIN_AGE_OF_CONSENT: i32 = 18;
/// Oldest caregiver age accepted at screening (inclusive).
pub const MAX_AGE_OF_CONSENT: i32 = 64;

/// Failed screening rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningIneligibility {
    UnderAgeOfConsent,
    OverAgeOfConsent,
    NotACitizen,
    NoChildOverTen,
}

impl IneligibilityReason for ScreeningIneligibility {
    fn message(&self) -> String {
        match self {
            ScreeningIneligibility::UnderAgeOfConsent => {
                format!("Mother is under {MIN_AGE_OF_CONSENT}")
            }
            ScreeningIneligibility::OverAgeOfConsent => {
                format!("Mother is too old (>{MAX_AGE_OF_CONSENT})")
            }
            ScreeningIneligibility::NotACitizen => "Not a citizen".to_string(),
            ScreeningIneligibility::NoChildOverTen => {
                "Does not have a child > 10 years".to_string()
            }
        }
    }
}

impl fmt::Display for ScreeningIneligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Age, citizenship and older-child rules applied to a screened caregiver.
pub struct AgeCitizenChildEligibility;

impl AgeCitizenChildEligibility {
    pub fn evaluate(
        age_in_years: i32,
        has_omang: YesNo,
        has_child_over_10: YesNo,
    ) -> EligibilityResult<ScreeningIneligibility> {
        let mut reasons = Vec::new();

        check(
            &mut reasons,
            age_in_years < MIN_AGE_OF_CONSENT,
            ScreeningIneligibility::UnderAgeOfConsent,
        );
        check(
            &mut reasons,
            age_in_years > MAX_AGE_OF_CONSENT,
            ScreeningIneligibility::OverAgeOfConsent,
        );
        check(
            &mut reasons,
            has_omang.is_no(),
            ScreeningIneligibility::NotACitizen,
        );
        check(
            &mut reasons,
            has_child_over_10.is_no(),
            ScreeningIneligibility::NoChildOverTen,
        );

        EligibilityResult::from_reasons(reasons)
    }

    pub fn for_screening(
        screening: &CaregiverScreening,
    ) -> EligibilityResult<ScreeningIneligibility> {
        Self::evaluate(
            screening.age_in_years,
            screening.has_omang,
            screening.has_child,
        )
    }
}
