//! Missing-value normalization

use anyhow::{Context, Result};
use polars::prelude::*;

use super::columns::{ALCOHOL_FREQ, NO_ALCOHOL};

/// Rewrite the alcohol frequency column as text with no missing entries.
///
/// Every value is coerced to its textual form; absent values, float NaN and
/// the literal `"nan"` become [`NO_ALCOHOL`]. Returns how many cells were
/// rewritten. Running it again rewrites nothing.
pub fn clean_alcohol_freq(df: &mut DataFrame) -> Result<usize> {
    let column = df
        .column(ALCOHOL_FREQ)
        .with_context(|| format!("Required column '{}' not found", ALCOHOL_FREQ))?;
    let column = if column.dtype().is_float() {
        nan_as_null(column)?
    } else {
        column.clone()
    };
    let text = column
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be converted to text", ALCOHOL_FREQ))?;

    let mut rewritten = 0usize;
    let cleaned: Vec<String> = text
        .str()?
        .into_iter()
        .map(|value| match value {
            None | Some("nan") => {
                rewritten += 1;
                NO_ALCOHOL.to_string()
            }
            Some(v) => v.to_string(),
        })
        .collect();

    df.with_column(Column::new(ALCOHOL_FREQ.into(), cleaned))?;
    Ok(rewritten)
}

/// Float NaN casts to the text "NaN", so it is turned into a null first
fn nan_as_null(column: &Column) -> Result<Column> {
    let floats = column.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(Column::new(column.name().clone(), values))
}

/// Total number of missing cells across every column
pub fn count_missing(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

/// Missing cells per column, in frame order, skipping complete columns
pub fn missing_by_column(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .filter(|col| col.null_count() > 0)
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect()
}
