//! Report module - run summaries and artifact inspection

pub mod artifact_report;
pub mod summary;

pub use artifact_report::*;
pub use summary::*;
