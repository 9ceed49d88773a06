//! Terminal helpers shared by the binary and the pipeline

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
