use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check, EligibilityResult, IneligibilityReason};
use crate::workflows::caregiver::domain::{ConsentChecklist, YesNo};

/// Failed step of the informed consent process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentIneligibility {
    ConsentNotReviewed,
    QuestionsNotAnswered,
    UnderstandingNotDemonstrated,
    ConsentNotSigned,
    CopyNotProvided,
}

impl IneligibilityReason for ConsentIneligibility {
    fn message(&self) -> String {
        let text = match self {
            ConsentIneligibility::ConsentNotReviewed => {
                "Consent was not reviewed with the participant."
            }
            ConsentIneligibility::QuestionsNotAnswered => {
                "Did not answer all questions the participant had about the study."
            }
            ConsentIneligibility::UnderstandingNotDemonstrated => {
                "Participant did not demonstrate understanding of the study."
            }
            ConsentIneligibility::ConsentNotSigned => "Participant did not sign the consent form.",
            ConsentIneligibility::CopyNotProvided => {
                "Participant was not provided with a copy of their informed consent."
            }
        };
        text.to_string()
    }
}

impl fmt::Display for ConsentIneligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Checks that consent was taken properly: reviewed, questions answered, understanding
/// assessed, signed, and a copy handed over.
pub struct ConsentQualityEligibility;

impl ConsentQualityEligibility {
    pub fn evaluate(
        consent_reviewed: YesNo,
        study_questions: YesNo,
        assessment_score: YesNo,
        consent_signature: YesNo,
        consent_copy: YesNo,
    ) -> EligibilityResult<ConsentIneligibility> {
        let mut reasons = Vec::new();

        check(
            &mut reasons,
            consent_reviewed.is_no(),
            ConsentIneligibility::ConsentNotReviewed,
        );
        check(
            &mut reasons,
            study_questions.is_no(),
            ConsentIneligibility::QuestionsNotAnswered,
        );
        check(
            &mut reasons,
            assessment_score.is_no(),
            ConsentIneligibility::UnderstandingNotDemonstrated,
        );
        check(
            &mut reasons,
            consent_signature.is_no(),
            ConsentIneligibility::ConsentNotSigned,
        );
        check(
            &mut reasons,
            consent_copy.is_no(),
            ConsentIneligibility::CopyNotProvided,
        );

        EligibilityResult::from_reasons(reasons)
    }

    pub fn for_checklist(checklist: &ConsentChecklist) -> EligibilityResult<ConsentIneligibility> {
        Self::evaluate(
            checklist.consent_reviewed,
            checklist.study_questions,
            checklist.assessment_score,
            checklist.consent_signature,
            checklist.consent_copy,
        )
    }
}
