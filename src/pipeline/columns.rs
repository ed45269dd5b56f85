//! Column extraction from polars DataFrames
//!
//! The preprocessing steps operate on plain vectors. These helpers pull a named
//! column out of a DataFrame as either numeric or categorical values, mapping
//! nulls (and NaN for numeric columns) to `None`.

use anyhow::{bail, Context, Result};
use polars::prelude::*;

/// Extract a column as optional `f64` values.
///
/// Fails if the column is absent, holds values that cannot be read as numbers, or
/// holds infinite values.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Numeric column '{}' not found", name))?;

    let floats = column
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .with_context(|| {
            format!(
                "Numeric column '{}' has dtype {} and cannot be read as Float64",
                name,
                column.dtype()
            )
        })?;

    let mut values = Vec::with_capacity(floats.len());
    for (row, v) in floats.f64()?.into_iter().enumerate() {
        match v {
            Some(x) if x.is_infinite() => bail!(
                "Numeric column '{}' contains an infinite value at row {}; only finite numbers or missing entries are accepted",
                name,
                row
            ),
            Some(x) if x.is_nan() => values.push(None),
            other => values.push(other),
        }
    }

    Ok(values)
}

/// Extract a column as optional string categories.
///
/// Non-string columns are rendered through their string representation.
pub fn categorical_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Categorical column '{}' not found", name))?;

    let strings = column
        .as_materialized_series()
        .cast(&DataType::String)
        .with_context(|| format!("Categorical column '{}' cannot be read as text", name))?;

    let values = strings
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();

    Ok(values)
}

/// Names of the columns in `required` that `df` does not contain
pub fn missing_columns(df: &DataFrame, required: &[String]) -> Vec<String> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    required
        .iter()
        .filter(|name| !present.contains(name))
        .cloned()
        .collect()
}
