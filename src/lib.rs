//! medical-eda: exploratory data analysis of a medical insurance dataset
//!
//! Loads the dataset, normalizes missing alcohol frequencies, summarizes the
//! key numeric variables, derives log-scaled cost and demographic categories,
//! aggregates cost and chronic-condition burden by group, and renders the
//! results as PNG tables and charts.

pub mod cli;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod utils;
