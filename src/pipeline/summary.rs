//! Per-column descriptive statistics

use anyhow::Result;
use polars::prelude::*;

use super::stats::{column_values, present, Describe};
use crate::report::StatTable;

pub const SUMMARY_TITLE: &str = "Summary Statistics of Key Medical and Insurance Variables";

/// Column headers of the summary table
pub const SUMMARY_HEADERS: [&str; 8] = [
    "Count", "Mean", "Median", "Std_Dev", "Min", "25%", "75%", "Max",
];

/// Describe a single column, ignoring missing cells
pub fn describe_column(df: &DataFrame, name: &str) -> Result<Describe> {
    let values = present(&column_values(df, name)?);
    Ok(Describe::from_values(&values))
}

/// Build the summary statistics table, one row per column in `columns`
/// order, every statistic rounded to two decimals.
///
/// A column with no usable values yields Count 0 and NaN elsewhere.
/// A column that does not exist is an error.
pub fn summarize_columns(df: &DataFrame, columns: &[&str]) -> Result<StatTable> {
    let mut table = StatTable::new(SUMMARY_TITLE, &SUMMARY_HEADERS);

    for name in columns {
        let described = describe_column(df, name)?.rounded();
        table.push_row(name, described.to_row());
    }

    Ok(table)
}
