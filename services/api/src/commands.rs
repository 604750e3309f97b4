use clap::Args;
use std::path::PathBuf;

use pre_flourish::error::AppError;
use pre_flourish::workflows::caregiver::{
    AgeCitizenChildEligibility, ConsentQualityEligibility, EligibilityResult,
    IneligibilityReason, YesNo,
};
use pre_flourish::workflows::import::ScreeningImporter;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Caregiver age in completed years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i32,
    /// Whether the caregiver holds an Omang (yes, no, n/a)
    #[arg(long, default_value = "n/a")]
    pub(crate) has_omang: YesNo,
    /// Whether the caregiver has a child older than 10 (yes, no, n/a)
    #[arg(long, default_value = "n/a")]
    pub(crate) has_child: YesNo,
}

#[derive(Args, Debug)]
pub(crate) struct ConsentCheckArgs {
    /// Consent was reviewed with the participant
    #[arg(long, default_value = "n/a")]
    pub(crate) reviewed: YesNo,
    /// All participant questions about the study were answered
    #[arg(long, default_value = "n/a")]
    pub(crate) questions: YesNo,
    /// Participant demonstrated understanding of the study
    #[arg(long, default_value = "n/a")]
    pub(crate) assessment: YesNo,
    /// Participant signed the consent form
    #[arg(long, default_value = "n/a")]
    pub(crate) signature: YesNo,
    /// Participant was given a copy of the consent
    #[arg(long, default_value = "n/a")]
    pub(crate) copy: YesNo,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Screening export with Screening Identifier, Age, Has Omang and Has Child columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_screen(args: ScreenArgs) {
    let result = AgeCitizenChildEligibility::evaluate(args.age, args.has_omang, args.has_child);
    println!("Caregiver screening (age {})", args.age);
    print!("{}", render_eligibility(&result));
}

pub(crate) fn run_consent_check(args: ConsentCheckArgs) {
    let result = ConsentQualityEligibility::evaluate(
        args.reviewed,
        args.questions,
        args.assessment,
        args.signature,
        args.copy,
    );
    println!("Informed consent checklist");
    print!("{}", render_eligibility(&result));
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let screenings = ScreeningImporter::from_path(&args.csv)?;
    let eligible = screenings
        .iter()
        .filter(|row| row.eligibility.is_eligible())
        .count();

    println!(
        "Screening import: {} caregivers, {} eligible",
        screenings.len(),
        eligible
    );
    for (index, row) in screenings.iter().enumerate() {
        let label = row
            .screening_identifier
            .as_ref()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| format!("row {}", index + 1));
        let reasons = row.eligibility.failure_reasons();
        if reasons.is_empty() {
            println!("- {label} (age {}): eligible", row.screening.age_in_years);
        } else {
            println!(
                "- {label} (age {}): ineligible ({})",
                row.screening.age_in_years,
                reasons.join("; ")
            );
        }
    }

    Ok(())
}

fn render_eligibility<R: IneligibilityReason>(result: &EligibilityResult<R>) -> String {
    if result.is_eligible() {
        return "Result: eligible\n".to_string();
    }

    let mut out = String::from("Result: not eligible\n");
    for reason in result.failure_reasons() {
        out.push_str(&format!("- {reason}\n"));
    }
    out
}
