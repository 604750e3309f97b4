//! Screening and consent-quality rule sets.
//!
//! Each evaluator checks every rule in a fixed order and records one reason per failed rule.
//! Reasons are enumerated codes; their reviewer-facing text comes from `message()`.

mod consent;
mod screening;

pub use consent::{ConsentIneligibility, ConsentQualityEligibility};
pub use screening::{
    AgeCitizenChildEligibility, ScreeningIneligibility, MAX_AGE_OF_CONSENT, MIN_AGE_OF_CONSENT,
};

use serde::Serialize;

/// Reason code produced by a failed eligibility rule.
pub trait IneligibilityReason {
    fn message(&self) -> String;
}

/// Outcome of a single evaluator pass.
///
/// Built only from the collected reasons, so `is_eligible()` always equals
/// `reasons().is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult<R> {
    is_eligible: bool,
    reasons: Vec<R>,
}

impl<R> EligibilityResult<R> {
    pub(crate) fn from_reasons(reasons: Vec<R>) -> Self {
        Self {
            is_eligible: reasons.is_empty(),
            reasons,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.is_eligible
    }

    /// Failed rules in evaluation order.
    pub fn reasons(&self) -> &[R] {
        &self.reasons
    }
}

impl<R: IneligibilityReason> EligibilityResult<R> {
    /// Reviewer-facing text for each failed rule, in evaluation order.
    pub fn failure_reasons(&self) -> Vec<String> {
        self.reasons.iter().map(IneligibilityReason::message).collect()
    }
}

/// Appends `reason` when `failed` holds. Rules never short-circuit one another.
fn check<R>(reasons: &mut Vec<R>, failed: bool, reason: R) {
    if failed {
        reasons.push(reason);
    }
}
