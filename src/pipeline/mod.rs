//! Pipeline module - load, clean, summarize, derive and aggregate

pub mod aggregate;
pub mod analysis;
pub mod cleaner;
pub mod columns;
pub mod loader;
pub mod stats;
pub mod summary;
pub mod transform;

pub use aggregate::*;
pub use analysis::*;
pub use cleaner::*;
pub use loader::*;
pub use summary::*;
pub use transform::*;
