//! Dataset loader for CSV and Parquet files

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crate::utils::{create_spinner, finish_with_success};

/// Cell spellings read as missing, matching the conventions of the tools
/// the insurance dataset is usually exported from.
pub const MISSING_SPELLINGS: [&str; 13] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "<NA>",
];

/// One line of the schema overview
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub nulls: usize,
}

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` is the number of CSV rows used for type inference;
/// 0 scans the whole file.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            let null_values = MISSING_SPELLINGS.iter().map(|s| (*s).into()).collect();

            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_length)
                .with_null_values(Some(NullValues::AllColumns(null_values)))
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Load a dataset behind a spinner.
///
/// Returns the frame with its row count, column count and estimated size in MB.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Reading {}...", path.display()));
    let df = match load_dataset(path, infer_schema_length) {
        Ok(df) => df,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    Ok((df, rows, cols, memory_mb))
}

/// Name, type and null counts for every column, in frame order
pub fn describe_schema(df: &DataFrame) -> Vec<ColumnInfo> {
    df.get_columns()
        .iter()
        .map(|col| {
            let nulls = col.null_count();
            ColumnInfo {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: col.len() - nulls,
                nulls,
            }
        })
        .collect()
}

/// Print the column-by-column schema overview
pub fn print_schema_overview(df: &DataFrame) {
    let schema = describe_schema(df);
    let name_width = schema
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!(
        "\n    {} Data columns (total {} columns):",
        style("✧").cyan(),
        schema.len()
    );
    println!(
        "      {:>3}  {:<width$}  {:>14}  {}",
        "#",
        "Column",
        "Non-Null Count",
        "Dtype",
        width = name_width
    );
    for (idx, info) in schema.iter().enumerate() {
        let count = format!("{:>14}", format!("{} non-null", info.non_null));
        let count = if info.nulls > 0 {
            style(count).yellow().to_string()
        } else {
            count
        };
        println!(
            "      {:>3}  {:<width$}  {}  {}",
            idx,
            info.name,
            count,
            style(&info.dtype).dim(),
            width = name_width
        );
    }
}

/// Fail listing every name from `required` that the frame does not carry
pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    let available: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    let absent: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !available.contains(name))
        .collect();

    if !absent.is_empty() {
        anyhow::bail!(
            "Required column(s) not found in dataset: {:?}. Available columns: {:?}",
            absent,
            available
        );
    }
    Ok(())
}
