//! Standard scaling of a single column

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Scales below this are treated as zero variance and replaced by 1.0
const MIN_SCALE: f64 = 10.0 * f64::EPSILON;

/// Unfitted scaler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Subtract the training mean before dividing by the standard deviation.
    /// Disabled for one-hot indicators, which are only rescaled.
    pub with_mean: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self { with_mean: true }
    }

    /// Scaler that divides by the standard deviation without centering
    pub fn variance_only() -> Self {
        Self { with_mean: false }
    }

    /// Learn mean and population variance from fully observed values.
    ///
    /// Fails when the statistics are not finite (infinite inputs or overflow).
    pub fn fit(&self, values: &[f64]) -> Result<FittedScaler> {
        if values.is_empty() {
            return Ok(FittedScaler {
                mean: if self.with_mean { Some(0.0) } else { None },
                variance: 0.0,
                scale: 1.0,
            });
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        if !mean.is_finite() || !variance.is_finite() {
            bail!(
                "Scaling statistics are not finite (mean {}, variance {})",
                mean,
                variance
            );
        }

        let std_dev = variance.sqrt();
        let scale = if std_dev < MIN_SCALE { 1.0 } else { std_dev };

        Ok(FittedScaler {
            mean: if self.with_mean { Some(mean) } else { None },
            variance,
            scale,
        })
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

/// Learned scaling parameters for one output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedScaler {
    /// Training mean, or `None` when centering is disabled
    pub mean: Option<f64>,
    /// Training population variance
    pub variance: f64,
    /// Divisor applied on transform (standard deviation, or 1.0 for constant columns)
    pub scale: f64,
}

impl FittedScaler {
    /// Check that loaded parameters can be applied.
    pub fn validate(&self) -> Result<()> {
        if let Some(mean) = self.mean {
            if !mean.is_finite() {
                bail!("Scaler mean {} is not finite", mean);
            }
        }
        if !self.variance.is_finite() || self.variance < 0.0 {
            bail!("Scaler variance {} is not a finite non-negative number", self.variance);
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            bail!("Scaler scale {} is not a finite positive number", self.scale);
        }
        Ok(())
    }

    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        match self.mean {
            Some(mean) => (value - mean) / self.scale,
            None => value / self.scale,
        }
    }
}
