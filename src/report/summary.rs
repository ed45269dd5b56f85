//! Transformation run summary

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::TransformationOutput;

/// Shapes and timings of one transformation run
#[derive(Debug, Default)]
pub struct TransformationSummary {
    pub train_shape: (usize, usize),
    pub test_shape: (usize, usize),
    pub feature_count: usize,
    pub artifact_path: PathBuf,
    pub exported_arrays: Option<PathBuf>,
    pub transform_time: Option<Duration>,
    pub export_time: Option<Duration>,
}

impl TransformationSummary {
    pub fn from_output(output: &TransformationOutput) -> Self {
        Self {
            train_shape: (output.train.nrows(), output.train.ncols()),
            test_shape: (output.test.nrows(), output.test.ncols()),
            feature_count: output.feature_names.len(),
            artifact_path: output.artifact_path.clone(),
            ..Default::default()
        }
    }

    pub fn set_transform_time(&mut self, elapsed: Duration) {
        self.transform_time = Some(elapsed);
    }

    pub fn set_export(&mut self, dir: PathBuf, elapsed: Duration) {
        self.exported_arrays = Some(dir);
        self.export_time = Some(elapsed);
    }

    /// Build the summary table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🧮 Feature Columns"),
            Cell::new(self.feature_count)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("📘 Train Array"),
            Cell::new(format!("{} x {}", self.train_shape.0, self.train_shape.1)),
        ]);
        table.add_row(vec![
            Cell::new("📗 Test Array"),
            Cell::new(format!("{} x {}", self.test_shape.0, self.test_shape.1)),
        ]);
        table.add_row(vec![
            Cell::new("💾 Artifact"),
            Cell::new(self.artifact_path.display()).fg(Color::Cyan),
        ]);

        if let Some(dir) = &self.exported_arrays {
            table.add_row(vec![
                Cell::new("📤 Exported Arrays"),
                Cell::new(dir.display()).fg(Color::Cyan),
            ]);
        }

        if let Some(elapsed) = self.transform_time {
            table.add_row(vec![
                Cell::new("⏱️  Transform Time"),
                Cell::new(format_duration(elapsed)),
            ]);
        }
        if let Some(elapsed) = self.export_time {
            table.add_row(vec![
                Cell::new("⏱️  Export Time"),
                Cell::new(format_duration(elapsed)),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("TRANSFORMATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }
    }
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0} ms", secs * 1000.0)
    } else {
        format!("{:.2} s", secs)
    }
}
