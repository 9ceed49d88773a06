//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::report::{BUNDLE_FILE_NAME, REPORT_FILE_NAME};

/// medical-eda - Exploratory analysis of a medical insurance dataset
#[derive(Parser, Debug)]
#[command(name = "medical-eda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = "medical_insurance.csv")]
    pub input: PathBuf,

    /// Directory the PNG artifacts are written to. Created when missing.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Resolution of the rendered images in dots per inch (10 to 1200)
    #[arg(long, default_value = "300", value_parser = validate_dpi)]
    pub dpi: u32,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Also write a JSON report with the statistic tables and artifact list
    #[arg(long, default_value = "false")]
    pub report: bool,

    /// Also package every artifact (and the report, if written) into a zip archive
    #[arg(long, default_value = "false")]
    pub bundle: bool,
}

impl Cli {
    /// Path of the JSON report inside the output directory
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    /// Path of the zip bundle inside the output directory
    pub fn bundle_path(&self) -> PathBuf {
        self.output_dir.join(BUNDLE_FILE_NAME)
    }
}

/// Validator for the dpi parameter
fn validate_dpi(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid whole number", s))?;

    if !(10..=1200).contains(&value) {
        Err(format!("dpi must be between 10 and 1200, got {}", value))
    } else {
        Ok(value)
    }
}
