//! Categorical sub-pipeline: most-frequent imputation, one-hot encoding, and
//! variance-only scaling of each indicator column

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::impute::most_frequent;
use super::scaler::{FittedScaler, StandardScaler};
use super::schema::UnknownCategoryPolicy;

/// Unfitted categorical branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalPipeline {
    pub handle_unknown: UnknownCategoryPolicy,
    pub scaler: StandardScaler,
}

impl CategoricalPipeline {
    pub fn new(handle_unknown: UnknownCategoryPolicy) -> Self {
        Self {
            handle_unknown,
            scaler: StandardScaler::variance_only(),
        }
    }

    /// Learn the fill value, sorted vocabulary, and indicator scales of one column.
    pub fn fit_column(
        &self,
        name: &str,
        values: &[Option<String>],
    ) -> Result<FittedCategoricalColumn> {
        let Some(fill) = most_frequent(values) else {
            bail!(
                "Categorical column '{}' has no observed values to compute a most frequent value from",
                name
            );
        };

        let imputed: Vec<&str> = values
            .iter()
            .map(|v| v.as_deref().unwrap_or(fill.as_str()))
            .collect();

        let mut categories: Vec<String> = imputed.iter().map(|s| s.to_string()).collect();
        categories.sort();
        categories.dedup();

        let scalers = categories
            .iter()
            .map(|category| {
                let indicator: Vec<f64> = imputed
                    .iter()
                    .map(|v| if *v == category.as_str() { 1.0 } else { 0.0 })
                    .collect();
                self.scaler.fit(&indicator).with_context(|| {
                    format!("Failed to scale indicator '{}' of column '{}'", category, name)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FittedCategoricalColumn {
            name: name.to_string(),
            most_frequent: fill,
            categories,
            scalers,
            handle_unknown: self.handle_unknown,
        })
    }
}

/// Learned parameters for one categorical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedCategoricalColumn {
    pub name: String,
    /// Training mode used to fill missing entries
    pub most_frequent: String,
    /// Sorted vocabulary; one output column per entry
    pub categories: Vec<String>,
    /// Variance-only scaler per indicator column, aligned with `categories`
    pub scalers: Vec<FittedScaler>,
    pub handle_unknown: UnknownCategoryPolicy,
}

impl FittedCategoricalColumn {
    /// Number of indicator columns this column expands into
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Check that loaded parameters can be applied: one valid scaler per category and
    /// a strictly sorted vocabulary containing the fill value.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            bail!("Categorical column '{}' has an empty vocabulary", self.name);
        }
        if self.scalers.len() != self.categories.len() {
            bail!(
                "Categorical column '{}' has {} categories but {} scalers",
                self.name,
                self.categories.len(),
                self.scalers.len()
            );
        }
        if self.categories.windows(2).any(|w| w[0] >= w[1]) {
            bail!(
                "Categorical column '{}' vocabulary is not sorted and unique",
                self.name
            );
        }
        if self.categories.binary_search(&self.most_frequent).is_err() {
            bail!(
                "Categorical column '{}' fill value '{}' is not in its vocabulary",
                self.name,
                self.most_frequent
            );
        }
        for (category, scaler) in self.categories.iter().zip(&self.scalers) {
            scaler.validate().with_context(|| {
                format!(
                    "Invalid scaler for indicator '{}' of column '{}'",
                    category, self.name
                )
            })?;
        }
        Ok(())
    }

    /// Encode a column into `width()` scaled indicator columns (column-major).
    pub fn transform(&self, values: &[Option<String>]) -> Result<Vec<Vec<f64>>> {
        let mut block = vec![vec![0.0; values.len()]; self.width()];

        for (row, value) in values.iter().enumerate() {
            let value = value.as_deref().unwrap_or(self.most_frequent.as_str());

            match self.categories.binary_search_by(|c| c.as_str().cmp(value)) {
                Ok(idx) => {
                    let Some(scaler) = self.scalers.get(idx) else {
                        bail!(
                            "Categorical column '{}' has no scaler for category '{}'",
                            self.name,
                            value
                        );
                    };
                    block[idx][row] = scaler.apply(1.0);
                }
                Err(_) => {
                    if self.handle_unknown == UnknownCategoryPolicy::Error {
                        bail!(
                            "Found unknown category '{}' in column '{}' during transform (known: {:?})",
                            value,
                            self.name,
                            self.categories
                        );
                    }
                }
            }
        }

        Ok(block)
    }
}
