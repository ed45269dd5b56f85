//! Column-dispatching preprocessor
//!
//! [`build_preprocessor`] wires the numeric and categorical sub-pipelines into an
//! unfitted [`Preprocessor`]. Fitting consumes it and yields a
//! [`FittedPreprocessor`], whose `transform` only reads learned parameters, so a
//! fitted preprocessor can be applied to any number of splits without being
//! re-fitted on them.
//!
//! Output layout: one column per numeric input (schema order), followed by one
//! indicator column per learned category of each categorical input (schema order,
//! categories sorted).

use anyhow::{bail, Context, Result};
use faer::Mat;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::categorical::{CategoricalPipeline, FittedCategoricalColumn};
use super::columns::{categorical_values, missing_columns, numeric_values};
use super::numeric::{FittedNumericColumn, NumericPipeline};
use super::schema::{FeatureSchema, UnknownCategoryPolicy};

/// Build the unfitted preprocessor for `schema`.
///
/// Pure with respect to data: nothing is read until [`Preprocessor::fit`].
pub fn build_preprocessor(
    schema: &FeatureSchema,
    handle_unknown: UnknownCategoryPolicy,
) -> Preprocessor {
    let numeric_pipeline = NumericPipeline::new();
    let categorical_pipeline = CategoricalPipeline::new(handle_unknown);

    info!("Categorical Columns: {:?}", schema.categorical_columns);
    info!("Numerical Columns: {:?}", schema.numeric_columns);

    Preprocessor {
        numeric_columns: schema.numeric_columns.clone(),
        categorical_columns: schema.categorical_columns.clone(),
        numeric_pipeline,
        categorical_pipeline,
    }
}

/// Declarative, unfitted preprocessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessor {
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    numeric_pipeline: NumericPipeline,
    categorical_pipeline: CategoricalPipeline,
}

impl Preprocessor {
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    /// Learn all column parameters from `df`.
    pub fn fit(self, df: &DataFrame) -> Result<FittedPreprocessor> {
        ensure_columns(df, &self.numeric_columns, &self.categorical_columns)?;

        let numeric = self
            .numeric_columns
            .iter()
            .map(|name| {
                let values = numeric_values(df, name)?;
                self.numeric_pipeline.fit_column(name, &values)
            })
            .collect::<Result<Vec<_>>>()?;

        let categorical = self
            .categorical_columns
            .iter()
            .map(|name| {
                let values = categorical_values(df, name)?;
                self.categorical_pipeline.fit_column(name, &values)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FittedPreprocessor {
            numeric,
            categorical,
        })
    }

    /// Fit on `df` and transform it in one call.
    pub fn fit_transform(self, df: &DataFrame) -> Result<(FittedPreprocessor, Mat<f64>)> {
        let fitted = self.fit(df)?;
        let matrix = fitted.transform(df)?;
        Ok((fitted, matrix))
    }
}

/// Preprocessor with learned imputation, vocabulary, and scaling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    numeric: Vec<FittedNumericColumn>,
    categorical: Vec<FittedCategoricalColumn>,
}

impl FittedPreprocessor {
    pub fn numeric(&self) -> &[FittedNumericColumn] {
        &self.numeric
    }

    pub fn categorical(&self) -> &[FittedCategoricalColumn] {
        &self.categorical
    }

    /// Check every learned parameter, as required before applying a reloaded preprocessor.
    pub fn validate(&self) -> Result<()> {
        for column in &self.numeric {
            column.validate()?;
        }
        for column in &self.categorical {
            column.validate()?;
        }
        Ok(())
    }

    /// Number of output feature columns
    pub fn n_features_out(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.width()).sum::<usize>()
    }

    /// Output column names: `num__<column>` then `cat__<column>_<category>`
    pub fn feature_names_out(&self) -> Vec<String> {
        let numeric = self.numeric.iter().map(|c| format!("num__{}", c.name));
        let categorical = self.categorical.iter().flat_map(|c| {
            c.categories
                .iter()
                .map(move |category| format!("cat__{}_{}", c.name, category))
        });
        numeric.chain(categorical).collect()
    }

    /// Apply the learned parameters to `df`.
    pub fn transform(&self, df: &DataFrame) -> Result<Mat<f64>> {
        let numeric_names: Vec<String> = self.numeric.iter().map(|c| c.name.clone()).collect();
        let categorical_names: Vec<String> =
            self.categorical.iter().map(|c| c.name.clone()).collect();
        ensure_columns(df, &numeric_names, &categorical_names)?;

        let n_rows = df.height();
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(self.n_features_out());

        for fitted in &self.numeric {
            let values = numeric_values(df, &fitted.name)?;
            columns.push(fitted.transform(&values));
        }

        for fitted in &self.categorical {
            let values = categorical_values(df, &fitted.name)?;
            let block = fitted
                .transform(&values)
                .with_context(|| format!("Failed to encode column '{}'", fitted.name))?;
            columns.extend(block);
        }

        Ok(Mat::from_fn(n_rows, columns.len(), |i, j| columns[j][i]))
    }
}

fn ensure_columns(df: &DataFrame, numeric: &[String], categorical: &[String]) -> Result<()> {
    let required: Vec<String> = numeric.iter().chain(categorical.iter()).cloned().collect();
    let missing = missing_columns(df, &required);
    if !missing.is_empty() {
        bail!("Columns not found in input data: {:?}", missing);
    }
    Ok(())
}
