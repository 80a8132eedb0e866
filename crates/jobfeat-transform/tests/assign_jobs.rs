//! Tests for critical job labelling.

use jobfeat_transform::{AssignJobs, JOB_NAME_COLUMN, TransformError, Transformer, UNASSIGNED_JOB};
use polars::prelude::*;

fn labels(df: &DataFrame) -> Vec<Option<String>> {
    df.column(JOB_NAME_COLUMN)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

#[test]
fn labels_rows_by_substring() {
    let mut df = df!("Name" => ["nightly-build-1", "deploy-prod", "unit-test-run"]).unwrap();

    let out = AssignJobs::new(["build", "test"]).transform(&mut df).unwrap();

    let expected = vec![
        Some("build".to_string()),
        Some(UNASSIGNED_JOB.to_string()),
        Some("test".to_string()),
    ];
    assert_eq!(labels(&df), expected);
    assert_eq!(labels(&out), expected);
}

#[test]
fn later_job_overrides_earlier_match() {
    let mut df = df!("Name" => ["build-test-1"]).unwrap();

    AssignJobs::new(["build", "test"]).transform(&mut df).unwrap();

    assert_eq!(labels(&df), vec![Some("test".to_string())]);
}

#[test]
fn matching_is_case_sensitive() {
    let mut df = df!("Name" => ["Nightly-BUILD"]).unwrap();

    AssignJobs::new(["build"]).transform(&mut df).unwrap();

    assert_eq!(labels(&df), vec![Some(UNASSIGNED_JOB.to_string())]);
}

#[test]
fn null_names_stay_unassigned() {
    let mut df = df!("Name" => [None, Some("build-7")]).unwrap();

    AssignJobs::new(["build"]).transform(&mut df).unwrap();

    assert_eq!(
        labels(&df),
        vec![Some(UNASSIGNED_JOB.to_string()), Some("build".to_string())]
    );
}

#[test]
fn searches_configured_column() {
    let mut df = df!(
        "Name" => ["a", "b"],
        "JobName" => ["etl-load", "report"],
    )
    .unwrap();

    AssignJobs::new(["etl"])
        .with_column("JobName")
        .transform(&mut df)
        .unwrap();

    assert_eq!(
        labels(&df),
        vec![Some("etl".to_string()), Some(UNASSIGNED_JOB.to_string())]
    );
}

#[test]
fn empty_job_list_marks_every_row_unassigned() {
    let mut df = df!("Name" => ["x", "y"]).unwrap();

    AssignJobs::new(Vec::<String>::new())
        .transform(&mut df)
        .unwrap();

    assert_eq!(labels(&df), vec![Some(UNASSIGNED_JOB.to_string()); 2]);
}

#[test]
fn rerunning_overwrites_existing_labels() {
    let mut df = df!("Name" => ["build-1"]).unwrap();

    AssignJobs::new(["build"]).transform(&mut df).unwrap();
    AssignJobs::new(["deploy"]).transform(&mut df).unwrap();

    assert_eq!(df.width(), 2);
    assert_eq!(labels(&df), vec![Some(UNASSIGNED_JOB.to_string())]);
}

#[test]
fn missing_source_column_is_an_error() {
    let mut df = df!("JobName" => ["build"]).unwrap();

    let err = AssignJobs::new(["build"]).transform(&mut df).unwrap_err();

    assert!(matches!(
        err,
        TransformError::MissingColumns { ref columns } if columns == &["Name".to_string()]
    ));
}
