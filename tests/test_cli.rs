//! Tests for CLI argument parsing

use clap::Parser;
use medical_eda::cli::Cli;
use std::path::PathBuf;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["medical-eda"]);

    assert_eq!(
        cli.input,
        PathBuf::from("medical_insurance.csv"),
        "Default input should be medical_insurance.csv"
    );
    assert_eq!(cli.output_dir, PathBuf::from("."));
    assert_eq!(cli.dpi, 300, "Default resolution should be 300 DPI");
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
    assert!(!cli.report, "Report is off by default");
    assert!(!cli.bundle, "Bundle is off by default");
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "medical-eda",
        "-i",
        "data/insurance.parquet",
        "-o",
        "out",
        "--dpi",
        "150",
        "--infer-schema-length",
        "0",
        "--report",
        "--bundle",
    ]);

    assert_eq!(cli.input, PathBuf::from("data/insurance.parquet"));
    assert_eq!(cli.output_dir, PathBuf::from("out"));
    assert_eq!(cli.dpi, 150);
    assert_eq!(cli.infer_schema_length, 0);
    assert!(cli.report && cli.bundle);
}

#[test]
fn test_cli_output_paths() {
    let cli = Cli::parse_from(["medical-eda", "-o", "/tmp/eda"]);

    assert_eq!(
        cli.report_path(),
        PathBuf::from("/tmp/eda/analysis_report.json")
    );
    assert_eq!(cli.bundle_path(), PathBuf::from("/tmp/eda/eda_artifacts.zip"));
}

#[test]
fn test_cli_rejects_out_of_range_dpi() {
    assert!(Cli::try_parse_from(["medical-eda", "--dpi", "5"]).is_err());
    assert!(Cli::try_parse_from(["medical-eda", "--dpi", "1201"]).is_err());
    assert!(Cli::try_parse_from(["medical-eda", "--dpi", "abc"]).is_err());
    assert!(Cli::try_parse_from(["medical-eda", "--dpi", "10"]).is_ok());
    assert!(Cli::try_parse_from(["medical-eda", "--dpi", "1200"]).is_ok());
}
