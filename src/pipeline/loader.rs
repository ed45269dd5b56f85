//! Dataset loading and export for CSV and Parquet files

use anyhow::{bail, Context, Result};
use faer::Mat;
use polars::prelude::*;
use std::path::Path;

/// Strings read as missing in CSV input, in addition to empty fields
const CSV_NULL_VALUES: [&str; 3] = ["NA", "N/A", "null"];

/// Load a dataset from a file (CSV or Parquet based on extension).
///
/// `infer_schema_length` is the number of CSV rows used for dtype inference;
/// 0 scans the whole file.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    if !path.is_file() {
        bail!("File not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let infer = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            let null_values: Vec<PlSmallStr> = CSV_NULL_VALUES
                .iter()
                .map(|s| PlSmallStr::from_static(s))
                .collect();

            LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(infer)
                .with_null_values(Some(NullValues::AllColumns(null_values)))
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let df = lf
        .collect()
        .with_context(|| format!("Failed to parse tabular data from {}", path.display()))?;

    Ok(df)
}

/// Split a dataset into its input features (every column but the target) and the
/// target values. Null targets become NaN.
pub fn split_features_target(df: &DataFrame, target: &str) -> Result<(DataFrame, Vec<f64>)> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    let values: Vec<f64> = target_col
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .with_context(|| format!("Target column '{}' must be numeric", target))?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    let features = df.drop(target)?;

    Ok((features, values))
}

/// Append `target` as the last column of `features`.
pub fn append_target(features: &Mat<f64>, target: &[f64]) -> Result<Mat<f64>> {
    if features.nrows() != target.len() {
        bail!(
            "Row count mismatch: {} feature rows but {} target values",
            features.nrows(),
            target.len()
        );
    }

    let n_features = features.ncols();
    Ok(Mat::from_fn(features.nrows(), n_features + 1, |i, j| {
        if j < n_features {
            features[(i, j)]
        } else {
            target[i]
        }
    }))
}

/// Write a numeric array to CSV with the given header.
pub fn save_array(array: &Mat<f64>, header: &[String], path: &Path) -> Result<()> {
    if header.len() != array.ncols() {
        bail!(
            "Header has {} names but the array has {} columns",
            header.len(),
            array.ncols()
        );
    }

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let values: Vec<f64> = (0..array.nrows()).map(|i| array[(i, j)]).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    let mut df = DataFrame::new(columns)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(&mut df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    Ok(())
}
