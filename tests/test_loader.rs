//! Unit tests for dataset loading, target splitting, and array export

use faer::Mat;
use polars::prelude::*;
use scoreprep::pipeline::{append_target, load_dataset, save_array, split_features_target};
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("students.csv");
    let rows = common::generate_students(25, 1);
    common::write_students_csv(&csv_path, &rows);

    let df = load_dataset(&csv_path, 100).unwrap();

    assert_eq!(df.height(), 25);
    assert_eq!(df.width(), 8);
    assert!(df.column("parental_level_of_education").is_ok());
}

#[test]
fn test_load_parquet_file() {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("students.parquet");

    let mut df = df! {
        "reading_score" => [72i64, 90, 95],
        "lunch" => ["standard", "standard", "free/reduced"],
    }
    .unwrap();

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(&mut df).unwrap();

    let loaded = load_dataset(&parquet_path, 100).unwrap();

    assert_eq!(loaded.height(), 3);
    assert_eq!(loaded.get_column_names(), &["reading_score", "lunch"]);
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let bad_path = temp_dir.path().join("students.xlsx");
    std::fs::File::create(&bad_path).unwrap();

    let result = load_dataset(&bad_path, 100);

    assert!(result.is_err(), "Unsupported format should return error");
    let err_msg = result.unwrap_err().to_string();
    assert!(
        err_msg.contains("Unsupported"),
        "Error message should mention unsupported format: {}",
        err_msg
    );
}

#[test]
fn test_nonexistent_file() {
    let path = std::path::Path::new("/nonexistent/path/to/train.csv");

    let result = load_dataset(path, 100);

    assert!(result.is_err(), "Nonexistent file should return error");
    assert!(result.unwrap_err().to_string().contains("File not found"));
}

#[test]
fn test_csv_missing_markers_are_null() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("missing.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "lunch,reading_score").unwrap();
    writeln!(file, "standard,").unwrap();
    writeln!(file, "NA,65").unwrap();
    writeln!(file, ",N/A").unwrap();
    writeln!(file, "free/reduced,80").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();

    assert_eq!(df.height(), 4);
    assert_eq!(df.column("lunch").unwrap().null_count(), 2);
    assert_eq!(df.column("reading_score").unwrap().null_count(), 2);
}

#[test]
fn test_split_features_target() {
    let df = df! {
        "reading_score" => [72.0f64, 90.0, 95.0],
        "math_score" => [Some(72i64), None, Some(90)],
        "lunch" => ["standard", "standard", "free/reduced"],
    }
    .unwrap();

    let (features, target) = split_features_target(&df, "math_score").unwrap();

    assert_eq!(features.get_column_names(), &["reading_score", "lunch"]);
    assert_eq!(target[0], 72.0);
    assert!(target[1].is_nan(), "Null target becomes NaN");
    assert_eq!(target[2], 90.0);
}

#[test]
fn test_split_requires_target() {
    let df = df! {
        "reading_score" => [72.0f64],
    }
    .unwrap();

    let result = split_features_target(&df, "math_score");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("math_score"));
}

#[test]
fn test_append_target_places_target_last() {
    let features = Mat::from_fn(3, 2, |i, j| (i * 10 + j) as f64);
    let combined = append_target(&features, &[7.0, 8.0, 9.0]).unwrap();

    assert_eq!(combined.nrows(), 3);
    assert_eq!(combined.ncols(), 3);
    assert_eq!(combined[(1, 1)], 11.0);
    assert_eq!(common::column(&combined, 2), vec![7.0, 8.0, 9.0]);
}

#[test]
fn test_append_target_row_mismatch() {
    let features = Mat::<f64>::zeros(3, 2);
    assert!(append_target(&features, &[1.0]).is_err());
}

#[test]
fn test_save_array_writes_header_and_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("train_array.csv");
    let array = Mat::from_fn(4, 2, |i, j| (i + j) as f64 * 0.5);
    let header = vec!["num__reading_score".to_string(), "math_score".to_string()];

    save_array(&array, &header, &path).unwrap();

    let loaded = load_dataset(&path, 100).unwrap();
    assert_eq!(loaded.height(), 4);
    assert_eq!(loaded.get_column_names(), &["num__reading_score", "math_score"]);
}

#[test]
fn test_save_array_rejects_header_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let array = Mat::<f64>::zeros(2, 3);
    let header = vec!["only_one".to_string()];

    assert!(save_array(&array, &header, &temp_dir.path().join("x.csv")).is_err());
}
