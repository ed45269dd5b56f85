//! Shared test utilities and fixture generators

#![allow(dead_code)]

use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const GENDERS: [&str; 2] = ["female", "male"];
pub const RACES: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
pub const EDUCATION: [&str; 6] = [
    "associate's degree",
    "bachelor's degree",
    "high school",
    "master's degree",
    "some college",
    "some high school",
];
pub const LUNCH: [&str; 2] = ["free/reduced", "standard"];
pub const PREP: [&str; 2] = ["completed", "none"];

/// Output feature columns for data covering every category above
pub const EXPECTED_FEATURES: usize = 2 + 2 + 5 + 6 + 2 + 2;

pub const HEADER: &str = "gender,race_ethnicity,parental_level_of_education,lunch,test_preparation_course,math_score,reading_score,writing_score";

/// One record of the student-performance dataset
#[derive(Debug, Clone)]
pub struct StudentRow {
    pub gender: String,
    pub race_ethnicity: String,
    pub parental_level_of_education: String,
    pub lunch: String,
    pub test_preparation_course: String,
    pub math_score: f64,
    pub reading_score: f64,
    pub writing_score: f64,
}

impl StudentRow {
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.gender,
            self.race_ethnicity,
            self.parental_level_of_education,
            self.lunch,
            self.test_preparation_course,
            self.math_score,
            self.reading_score,
            self.writing_score
        )
    }
}

/// Generate `rows` deterministic records. Categories cycle so every value appears
/// once `rows` reaches 6.
pub fn generate_students(rows: usize, seed: u64) -> Vec<StudentRow> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..rows)
        .map(|i| StudentRow {
            gender: GENDERS[i % GENDERS.len()].to_string(),
            race_ethnicity: RACES[i % RACES.len()].to_string(),
            parental_level_of_education: EDUCATION[i % EDUCATION.len()].to_string(),
            lunch: LUNCH[(i / 2) % LUNCH.len()].to_string(),
            test_preparation_course: PREP[(i / 3) % PREP.len()].to_string(),
            math_score: rng.gen_range(0..=100) as f64,
            reading_score: rng.gen_range(17..=100) as f64,
            writing_score: rng.gen_range(10..=100) as f64,
        })
        .collect()
}

/// Write records to a CSV file with the standard header
pub fn write_students_csv(path: &Path, rows: &[StudentRow]) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row.to_csv_line()).unwrap();
    }
}

/// Write raw lines (header included) to a CSV file
pub fn write_raw_csv(path: &Path, lines: &[&str]) {
    let mut file = std::fs::File::create(path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

/// Temporary directory holding `train.csv` and `test.csv`
pub struct SplitFixture {
    pub dir: TempDir,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub train_rows: Vec<StudentRow>,
    pub test_rows: Vec<StudentRow>,
}

impl SplitFixture {
    pub fn new(train_rows: usize, test_rows: usize) -> Self {
        let dir = TempDir::new().unwrap();
        let train_path = dir.path().join("train.csv");
        let test_path = dir.path().join("test.csv");

        let train = generate_students(train_rows, 42);
        let test = generate_students(test_rows, 7);
        write_students_csv(&train_path, &train);
        write_students_csv(&test_path, &test);

        Self {
            dir,
            train_path,
            test_path,
            train_rows: train,
            test_rows: test,
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.dir.path().join("artifacts").join("pipeline.json")
    }
}

/// Values of column `j` of `m`
pub fn column(m: &Mat<f64>, j: usize) -> Vec<f64> {
    (0..m.nrows()).map(|i| m[(i, j)]).collect()
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Assert two matrices have equal shape and bit-identical entries
pub fn assert_bit_identical(a: &Mat<f64>, b: &Mat<f64>) {
    assert_eq!(a.nrows(), b.nrows(), "Row count mismatch");
    assert_eq!(a.ncols(), b.ncols(), "Column count mismatch");
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            assert_eq!(
                a[(i, j)].to_bits(),
                b[(i, j)].to_bits(),
                "Entry ({}, {}) differs: {} vs {}",
                i,
                j,
                a[(i, j)],
                b[(i, j)]
            );
        }
    }
}
