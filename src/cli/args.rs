//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{
    TransformationConfig, UnknownCategoryPolicy, DEFAULT_ARTIFACT_PATH,
    DEFAULT_INFER_SCHEMA_LENGTH,
};
use crate::utils::DEFAULT_LOG_DIR;

/// scoreprep - Fit and persist the preprocessing stage for student-performance data
#[derive(Parser, Debug)]
#[command(name = "scoreprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Training split (CSV or Parquet). The preprocessor is fit on this file only.
    #[arg(long)]
    pub train: Option<PathBuf>,

    /// Test split (CSV or Parquet), transformed with the preprocessor fit on --train
    #[arg(long)]
    pub test: Option<PathBuf>,

    /// Where the fitted preprocessor is written (overwritten if present)
    #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,

    /// Directory for the per-run log file
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Behavior for categories not seen during fit.
    /// Options: "ignore" (all-zero indicators, default) or "error"
    #[arg(long, default_value = "ignore")]
    pub handle_unknown: UnknownCategoryPolicy,

    /// Also write the transformed arrays as train_array.csv and test_array.csv into this directory
    #[arg(long)]
    pub save_arrays: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value_t = DEFAULT_INFER_SCHEMA_LENGTH)]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the learned parameters of a persisted preprocessor
    Inspect {
        /// Artifact written by a previous run
        artifact: PathBuf,
    },
}

impl Cli {
    /// Train and test paths, required when no subcommand is given.
    pub fn splits(&self) -> Option<(&PathBuf, &PathBuf)> {
        Some((self.train.as_ref()?, self.test.as_ref()?))
    }

    /// Transformation settings derived from the arguments, with the default schema.
    pub fn transformation_config(&self) -> TransformationConfig {
        TransformationConfig {
            artifact_path: self.artifact.clone(),
            unknown_categories: self.handle_unknown,
            infer_schema_length: self.infer_schema_length,
            ..Default::default()
        }
    }
}
