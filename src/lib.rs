//! scoreprep: preprocessing stage for student-performance regression
//!
//! Builds a column-wise preprocessor (median/mode imputation, standard scaling,
//! one-hot encoding), fits it on a training split, applies it to train and test,
//! and persists the fitted preprocessor for inference-time reuse.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::{ErrorKind, PipelineError};
