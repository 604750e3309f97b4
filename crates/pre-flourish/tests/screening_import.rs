use pre_flourish::workflows::caregiver::{ScreeningIdentifier, ScreeningIneligibility};
use pre_flourish::workflows::import::{ScreeningImportError, ScreeningImporter};

#[test]
fn importer_evaluates_rows_in_file_order() {
    let csv = "Screening Identifier,Age,Has Omang,Has Child\n\
S000101,34,Yes,Yes\n\
S000102,17,No,No\n\
S000103,65,N/A,\n";

    let screenings = ScreeningImporter::from_reader(csv.as_bytes()).expect("import succeeds");

    assert_eq!(screenings.len(), 3);
    assert_eq!(
        screenings[0].screening_identifier,
        Some(ScreeningIdentifier("S000101".to_string()))
    );
    assert!(screenings[0].eligibility.is_eligible());

    assert_eq!(
        screenings[1].eligibility.failure_reasons(),
        vec![
            "Mother is under 18".to_string(),
            "Not a citizen".to_string(),
            "Does not have a child > 10 years".to_string(),
        ]
    );

    assert_eq!(
        screenings[2].eligibility.reasons(),
        &[ScreeningIneligibility::OverAgeOfConsent]
    );
}

#[test]
fn importer_reports_missing_files() {
    match ScreeningImporter::from_path("does/not/exist.csv") {
        Err(ScreeningImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn importer_rejects_ragged_rows() {
    let csv = "Screening Identifier,Age,Has Omang,Has Child\nS000104,30,Yes\n";

    match ScreeningImporter::from_reader(csv.as_bytes()) {
        Err(ScreeningImportError::Csv(_)) => {}
        other => panic!("expected csv error, got {other:?}"),
    }
}

#[test]
fn out_of_range_ages_are_evaluated_without_dropping_the_batch() {
    let csv = "Screening Identifier,Age,Has Omang,Has Child\n\
S000105,30,Yes,Yes\n\
S000106,-1,Yes,Yes\n\
S000107,300,Yes,Yes\n";

    let screenings = ScreeningImporter::from_reader(csv.as_bytes()).expect("import succeeds");

    assert_eq!(screenings.len(), 3);
    assert!(screenings[0].eligibility.is_eligible());
    assert_eq!(
        screenings[1].eligibility.failure_reasons(),
        vec!["Mother is under 18".to_string()]
    );
    assert_eq!(
        screenings[2].eligibility.failure_reasons(),
        vec!["Mother is too old (>64)".to_string()]
    );
}
