//! Unit tests for dataset loader

use medical_eda::pipeline::{
    describe_schema, load_dataset, load_dataset_with_progress, require_columns,
};
use polars::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let (df, rows, cols, mem_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 2, "Should have 2 data rows");
    assert_eq!(cols, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["a", "b", "c"]);
    assert!(mem_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_parquet_file() {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test.parquet");

    let mut df = df! {
        "x" => [1i32, 2, 3],
        "y" => [4i32, 5, 6],
    }
    .unwrap();

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(&mut df).unwrap();

    let (loaded_df, rows, cols, _mem) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows, 3);
    assert_eq!(cols, 2);
    assert_eq!(loaded_df.get_column_names(), &["x", "y"]);
}

#[test]
fn test_missing_spellings_read_as_null() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("spellings.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "alcohol_freq,cost").unwrap();
    writeln!(file, "Weekly,1.5").unwrap();
    writeln!(file, "NA,2.5").unwrap();
    writeln!(file, ",NaN").unwrap();
    writeln!(file, "nan,3.5").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();

    assert_eq!(
        df.column("alcohol_freq").unwrap().null_count(),
        3,
        "NA, empty and nan should all be missing"
    );
    assert_eq!(df.column("cost").unwrap().null_count(), 1);
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_dataset(&temp_dir.path().join("absent.csv"), 100);
    assert!(result.is_err(), "A missing input file must be an error");
}

#[test]
fn test_load_unsupported_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.xlsx");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let err = load_dataset(&path, 100).unwrap_err();
    assert!(
        err.to_string().contains("Unsupported file format"),
        "Unexpected error: {}",
        err
    );
}

#[test]
fn test_round_trip_fixture_through_csv() {
    let mut df = common::create_insurance_dataframe();
    let (_dir, path) = common::write_csv(&mut df, "medical_insurance.csv");

    let loaded = load_dataset(&path, 0).unwrap();
    assert_eq!(loaded.shape(), df.shape());
    assert_eq!(loaded.column("alcohol_freq").unwrap().null_count(), 2);
}

#[test]
fn test_describe_schema_counts_nulls() {
    let df = common::create_insurance_dataframe();
    let schema = describe_schema(&df);

    assert_eq!(schema.len(), df.width());
    let chronic = schema.iter().find(|c| c.name == "chronic_count").unwrap();
    assert_eq!(chronic.nulls, 1);
    assert_eq!(chronic.non_null, 5);
}

#[test]
fn test_require_columns_lists_every_absent_name() {
    let df = common::create_insurance_dataframe();

    assert!(require_columns(&df, &["age", "bmi"]).is_ok());

    let err = require_columns(&df, &["age", "region", "sex"]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("region"), "Missing 'region' in: {}", message);
    assert!(message.contains("sex"), "Missing 'sex' in: {}", message);
}
