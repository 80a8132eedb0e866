//! Tests for one-hot encoding.

use jobfeat_transform::{CategoricalEncoder, DateTimeConverter, TransformError, Transformer};
use polars::prelude::*;

fn names(df: &DataFrame) -> Vec<String> {
    df.get_columns().iter().map(|c| c.name().to_string()).collect()
}

fn flags(df: &DataFrame, name: &str) -> Vec<i32> {
    df.column(name)
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

#[test]
fn encodes_text_columns_dropping_first_category() {
    let mut df = df!(
        "Queue" => ["gpu", "batch", "debug", "batch"],
        "CoresInUse" => [4, 8, 1, 2],
        "Load" => [0.5, 0.7, 0.1, 0.2],
    )
    .unwrap();

    let out = CategoricalEncoder::new().transform(&mut df).unwrap();

    assert_eq!(names(&out), ["CoresInUse", "Load", "Queue_debug", "Queue_gpu"]);
    assert_eq!(flags(&out, "Queue_debug"), vec![0, 0, 1, 0]);
    assert_eq!(flags(&out, "Queue_gpu"), vec![1, 0, 0, 0]);
}

#[test]
fn leaves_input_frame_untouched() {
    let mut df = df!("Queue" => ["gpu", "batch"], "Total" => [1, 2]).unwrap();
    let before = df.clone();

    let out = CategoricalEncoder::new().transform(&mut df).unwrap();

    assert!(df.equals(&before));
    assert_ne!(out.width(), df.width());
}

#[test]
fn null_values_get_no_indicator() {
    let mut df = df!("User" => [Some("bob"), None, Some("amy"), Some("cat")]).unwrap();

    let out = CategoricalEncoder::new().transform(&mut df).unwrap();

    assert_eq!(names(&out), ["User_bob", "User_cat"]);
    assert_eq!(flags(&out, "User_bob"), vec![1, 0, 0, 0]);
    assert_eq!(flags(&out, "User_cat"), vec![0, 0, 0, 1]);
}

#[test]
fn timestamps_and_numbers_pass_through() {
    let mut df = df!(
        "j_starttime" => ["2024-01-01 10:00:00", "2024-01-02 10:00:00"],
        "Total" => [10i64, 20],
        "Queue" => ["a", "b"],
    )
    .unwrap();
    DateTimeConverter::new(["j_starttime"])
        .transform(&mut df)
        .unwrap();

    let out = CategoricalEncoder::new().transform(&mut df).unwrap();

    assert_eq!(names(&out), ["j_starttime", "Total", "Queue_b"]);
    assert_eq!(
        out.column("j_starttime").unwrap().dtype(),
        &DataType::Datetime(TimeUnit::Nanoseconds, None)
    );
}

#[test]
fn boolean_columns_are_categorical() {
    let mut df = df!("Preempted" => [true, false, true]).unwrap();

    let out = CategoricalEncoder::new().transform(&mut df).unwrap();

    assert_eq!(names(&out), ["Preempted_true"]);
    assert_eq!(flags(&out, "Preempted_true"), vec![1, 0, 1]);
}

#[test]
fn single_category_column_disappears() {
    let mut df = df!("Cluster" => ["hpc", "hpc"], "Total" => [1, 2]).unwrap();

    let out = CategoricalEncoder::new().transform(&mut df).unwrap();

    assert_eq!(names(&out), ["Total"]);
}

#[test]
fn encoded_column_names_match_transform_output() {
    let mut df = df!(
        "Queue" => ["gpu", "batch", "debug"],
        "User" => ["x", "y", "x"],
        "Total" => [1, 2, 3],
    )
    .unwrap();
    let encoder = CategoricalEncoder::new();

    let predicted = encoder.encoded_column_names(&df).unwrap();
    let out = encoder.transform(&mut df).unwrap();

    assert_eq!(predicted, names(&out));
}

#[test]
fn categories_are_rederived_per_call() {
    let encoder = CategoricalEncoder::new();
    let mut first = df!("Queue" => ["a", "b"]).unwrap();
    let mut second = df!("Queue" => ["a", "b", "c"]).unwrap();

    let first = encoder.fit(&first.clone()).transform(&mut first).unwrap();
    let second = encoder.transform(&mut second).unwrap();

    assert_eq!(names(&first), ["Queue_b"]);
    assert_eq!(names(&second), ["Queue_b", "Queue_c"]);
}

#[test]
fn keeps_row_count_when_every_column_is_encoded_away() {
    let mut df = df!("Cluster" => ["hpc", "hpc", "hpc"]).unwrap();

    let out = CategoricalEncoder::new().transform(&mut df).unwrap();

    assert_eq!(out.width(), 0);
    assert_eq!(out.height(), 3);
}

#[test]
fn indicator_name_clash_is_reported() {
    let mut df = df!("q" => ["a", "b"], "q_b" => [1, 2]).unwrap();
    let encoder = CategoricalEncoder::new();

    let err = encoder.transform(&mut df).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"column 'q_b' would be created more than once");
    assert!(matches!(
        encoder.encoded_column_names(&df),
        Err(TransformError::DuplicateColumn { .. })
    ));
}
