//! Fixed feature schema for the student-performance dataset

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const TARGET_COLUMN: &str = "math_score";

pub const NUMERIC_COLUMNS: [&str; 2] = ["reading_score", "writing_score"];

pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    "gender",
    "race_ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
];

/// Named numeric and categorical input columns plus the target column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub target_column: String,
}

impl FeatureSchema {
    pub fn new(
        numeric_columns: Vec<String>,
        categorical_columns: Vec<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            numeric_columns,
            categorical_columns,
            target_column: target_column.into(),
        }
    }

    /// Every feature column, numeric first
    pub fn feature_columns(&self) -> Vec<String> {
        self.numeric_columns
            .iter()
            .chain(self.categorical_columns.iter())
            .cloned()
            .collect()
    }

    /// Feature columns followed by the target
    pub fn required_columns(&self) -> Vec<String> {
        let mut columns = self.feature_columns();
        columns.push(self.target_column.clone());
        columns
    }

    /// Check that the column lists are disjoint, free of duplicates, and exclude the target.
    pub fn validate(&self) -> Result<()> {
        if self.target_column.is_empty() {
            bail!("Target column name is empty");
        }

        let mut seen = HashSet::new();
        for name in self.feature_columns() {
            if name.is_empty() {
                bail!("Feature column names must not be empty");
            }
            if name == self.target_column {
                bail!(
                    "Target column '{}' must not also be configured as a feature",
                    name
                );
            }
            if !seen.insert(name.clone()) {
                bail!("Column '{}' is configured more than once", name);
            }
        }

        Ok(())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::new(
            NUMERIC_COLUMNS.iter().map(|s| s.to_string()).collect(),
            CATEGORICAL_COLUMNS.iter().map(|s| s.to_string()).collect(),
            TARGET_COLUMN,
        )
    }
}

/// Behavior when a category unseen during fit appears at transform time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Emit an all-zero indicator block for that column
    #[default]
    Ignore,
    /// Fail the transform
    Error,
}

impl std::str::FromStr for UnknownCategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(UnknownCategoryPolicy::Ignore),
            "error" => Ok(UnknownCategoryPolicy::Error),
            _ => Err(format!(
                "Invalid unknown-category policy '{}'. Valid options: ignore, error",
                s
            )),
        }
    }
}

impl std::fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownCategoryPolicy::Ignore => write!(f, "ignore"),
            UnknownCategoryPolicy::Error => write!(f, "error"),
        }
    }
}
