//! Numeric sub-pipeline: median imputation followed by standard scaling

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::impute::median;
use super::scaler::{FittedScaler, StandardScaler};

/// Unfitted numeric branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericPipeline {
    pub scaler: StandardScaler,
}

impl NumericPipeline {
    pub fn new() -> Self {
        Self {
            scaler: StandardScaler::new(),
        }
    }

    /// Learn the median and scaling parameters of one column.
    ///
    /// The scaler is fit on the imputed column, so filled entries count toward the
    /// mean and variance.
    pub fn fit_column(&self, name: &str, values: &[Option<f64>]) -> Result<FittedNumericColumn> {
        let Some(fill) = median(values) else {
            bail!(
                "Numeric column '{}' has no observed values to compute a median from",
                name
            );
        };

        let imputed: Vec<f64> = values.iter().map(|v| v.unwrap_or(fill)).collect();
        let scaler = self
            .scaler
            .fit(&imputed)
            .with_context(|| format!("Failed to scale numeric column '{}'", name))?;

        Ok(FittedNumericColumn {
            name: name.to_string(),
            median: fill,
            scaler,
        })
    }
}

impl Default for NumericPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Learned parameters for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedNumericColumn {
    pub name: String,
    /// Training median used to fill missing entries
    pub median: f64,
    pub scaler: FittedScaler,
}

impl FittedNumericColumn {
    /// Check that loaded parameters can be applied.
    pub fn validate(&self) -> Result<()> {
        if !self.median.is_finite() {
            bail!("Numeric column '{}' has a non-finite median", self.name);
        }
        self.scaler
            .validate()
            .with_context(|| format!("Invalid scaler for numeric column '{}'", self.name))
    }

    pub fn transform(&self, values: &[Option<f64>]) -> Vec<f64> {
        values
            .iter()
            .map(|v| self.scaler.apply(v.unwrap_or(self.median)))
            .collect()
    }
}
