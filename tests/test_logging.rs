//! Tests for the per-run log file

use scoreprep::pipeline::{DataTransformation, TransformationConfig};
use scoreprep::utils::RunLog;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_run_log_creates_timestamped_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");

    let log = RunLog::create(&log_dir).unwrap();

    assert!(log.path().starts_with(&log_dir));
    let name = log.path().file_name().unwrap().to_str().unwrap();
    assert!(name.ends_with(".log"));
    // YYYY_MM_DD_HH_MM_SS.log
    assert_eq!(name.len(), 19 + 4);
    assert_eq!(name.matches('_').count(), 5);

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert!(contents.contains("Logging initialized"));
}

#[test]
fn test_transformation_steps_are_logged() {
    let fixture = common::SplitFixture::new(30, 10);
    let log = RunLog::create(&fixture.dir.path().join("logs")).unwrap();
    let transformation = DataTransformation::new(
        TransformationConfig::default().with_artifact_path(fixture.artifact_path()),
    );

    log.scoped(|| {
        transformation
            .transform(&fixture.train_path, &fixture.test_path)
            .unwrap()
    });

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert!(contents.contains("Read Train and Test Data Completed."));
    assert!(contents.contains("Categorical Columns: [\"gender\""));
    assert!(contents.contains("Numerical Columns: [\"reading_score\", \"writing_score\"]"));
    assert!(contents.contains("Applying the preprocessing object"));
    assert!(contents.contains("Saved Preprocessing Object"));
    assert!(contents.contains("INFO"));
}
