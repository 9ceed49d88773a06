//! End-to-end analysis over a loaded dataset
//!
//! Cleans `alcohol_freq`, summarizes the raw numeric columns, appends the
//! derived columns and computes the grouped tables. The summary is taken
//! before the derived columns exist so it always describes the raw values.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::aggregate::{
    age_group_table, aggregate_chronic_by_bmi, aggregate_cost_by_age_group, bmi_chronic_table,
    AgeGroupCost, BmiChronicBurden,
};
use super::cleaner::{clean_alcohol_freq, count_missing};
use super::columns::SUMMARY_COLUMNS;
use super::summary::summarize_columns;
use super::transform::derive_columns;
use crate::report::StatTable;

/// Everything the analysis computes besides the derived columns
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Cells rewritten to "No Alcohol"
    pub alcohol_rewritten: usize,
    /// Null cells across the whole table after cleaning
    pub missing_after_cleaning: usize,
    pub summary: StatTable,
    pub age_groups: Vec<AgeGroupCost>,
    pub bmi_chronic: Vec<BmiChronicBurden>,
}

impl Analysis {
    pub fn age_group_table(&self) -> StatTable {
        age_group_table(&self.age_groups)
    }

    pub fn bmi_chronic_table(&self) -> StatTable {
        bmi_chronic_table(&self.bmi_chronic)
    }
}

/// Run cleaning, summary, derivation and aggregation in order.
///
/// `df` is modified in place: `alcohol_freq` is rewritten and the derived
/// columns are appended, ready for rendering.
pub fn analyze(df: &mut DataFrame) -> Result<Analysis> {
    let alcohol_rewritten = clean_alcohol_freq(df)?;
    let missing_after_cleaning = count_missing(df);

    let summary = summarize_columns(df, &SUMMARY_COLUMNS).context("Failed to summarize columns")?;

    derive_columns(df).context("Failed to derive columns")?;

    let age_groups = aggregate_cost_by_age_group(df)?;
    let bmi_chronic = aggregate_chronic_by_bmi(df)?;

    Ok(Analysis {
        alcohol_rewritten,
        missing_after_cleaning,
        summary,
        age_groups,
        bmi_chronic,
    })
}
