//! Transformation orchestrator
//!
//! Loads the train and test splits, fits the preprocessor on train only, applies it
//! to both splits, appends the target column, and persists the fitted preprocessor.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use faer::Mat;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ErrorKind, PipelineError, WithKind};

use super::artifact::save_preprocessor;
use super::columns::missing_columns;
use super::loader::{append_target, load_dataset, split_features_target};
use super::preprocessor::{build_preprocessor, Preprocessor};
use super::schema::{FeatureSchema, UnknownCategoryPolicy};

/// Default location of the persisted preprocessor
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/pipeline.json";

/// Default number of CSV rows used for dtype inference
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10000;

/// Settings for one transformation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationConfig {
    /// Where the fitted preprocessor is written
    pub artifact_path: PathBuf,
    pub schema: FeatureSchema,
    pub unknown_categories: UnknownCategoryPolicy,
    /// CSV rows used for dtype inference (0 = full scan)
    pub infer_schema_length: usize,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            schema: FeatureSchema::default(),
            unknown_categories: UnknownCategoryPolicy::default(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
        }
    }
}

impl TransformationConfig {
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = path.into();
        self
    }

    pub fn with_unknown_categories(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.unknown_categories = policy;
        self
    }
}

/// Arrays produced by a run. Each array ends with the raw target column.
#[derive(Debug)]
pub struct TransformationOutput {
    pub train: Mat<f64>,
    pub test: Mat<f64>,
    pub artifact_path: PathBuf,
    /// Names of the feature columns (the target column is not included)
    pub feature_names: Vec<String>,
}

/// Fits, applies, and persists the preprocessing stage
#[derive(Debug, Clone)]
pub struct DataTransformation {
    config: TransformationConfig,
}

impl DataTransformation {
    pub fn new(config: TransformationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    /// A fresh, unfitted preprocessor for the configured schema.
    pub fn build_transformer(&self) -> Preprocessor {
        build_preprocessor(&self.config.schema, self.config.unknown_categories)
    }

    /// Run the preprocessing stage on a train/test pair.
    pub fn transform(
        &self,
        train_path: &Path,
        test_path: &Path,
    ) -> Result<TransformationOutput, PipelineError> {
        let schema = &self.config.schema;
        schema.validate().or_kind(ErrorKind::Schema)?;

        let train_df =
            load_dataset(train_path, self.config.infer_schema_length).or_kind(ErrorKind::DataLoad)?;
        let test_df =
            load_dataset(test_path, self.config.infer_schema_length).or_kind(ErrorKind::DataLoad)?;
        info!("Read Train and Test Data Completed.");

        check_schema(&train_df, schema, "train")?;
        check_schema(&test_df, schema, "test")?;

        info!("Obtaining Preprocessing Object...");
        let preprocessor = self.build_transformer();

        let (train_features, train_target) =
            split_features_target(&train_df, &schema.target_column).or_kind(ErrorKind::Schema)?;
        let (test_features, test_target) =
            split_features_target(&test_df, &schema.target_column).or_kind(ErrorKind::Schema)?;

        info!("Applying the preprocessing object on train dataframe and test dataframe.");
        let (fitted, train_matrix) = preprocessor
            .fit_transform(&train_features)
            .or_kind(ErrorKind::Transform)?;
        let test_matrix = fitted
            .transform(&test_features)
            .or_kind(ErrorKind::Transform)?;

        let train = append_target(&train_matrix, &train_target).or_kind(ErrorKind::Transform)?;
        let test = append_target(&test_matrix, &test_target).or_kind(ErrorKind::Transform)?;
        info!(
            "Transformed train array {}x{}, test array {}x{}",
            train.nrows(),
            train.ncols(),
            test.nrows(),
            test.ncols()
        );

        let artifact_path = self.config.artifact_path.clone();
        save_preprocessor(&artifact_path, &fitted).or_kind(ErrorKind::Persistence)?;
        info!("Saved Preprocessing Object to {}", artifact_path.display());

        Ok(TransformationOutput {
            train,
            test,
            artifact_path,
            feature_names: fitted.feature_names_out(),
        })
    }
}

#[track_caller]
fn check_schema(df: &DataFrame, schema: &FeatureSchema, split: &str) -> Result<(), PipelineError> {
    let missing = missing_columns(df, &schema.required_columns());
    if missing.is_empty() {
        return Ok(());
    }
    Err(PipelineError::new(
        ErrorKind::Schema,
        anyhow!("{} data is missing configured columns: {:?}", split, missing),
    ))
}
