//! Report module - statistic tables, run summary and exported results

pub mod analysis_report;
pub mod summary;
pub mod table;

pub use analysis_report::*;
pub use summary::*;
pub use table::*;
