//! Tabular view of a persisted preprocessor

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PreprocessorArtifact;

/// Learned numeric parameters: median, mean, and scale per column
pub fn numeric_table(artifact: &PreprocessorArtifact) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Median").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Scale").add_attribute(Attribute::Bold),
    ]);

    for column in artifact.preprocessor.numeric() {
        table.add_row(vec![
            Cell::new(&column.name).fg(Color::Cyan),
            Cell::new(format!("{:.4}", column.median)),
            Cell::new(
                column
                    .scaler
                    .mean
                    .map(|m| format!("{:.4}", m))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(format!("{:.4}", column.scaler.scale)),
        ]);
    }

    table
}

/// Learned categorical parameters: fill value and vocabulary per column
pub fn categorical_table(artifact: &PreprocessorArtifact) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Most Frequent").add_attribute(Attribute::Bold),
        Cell::new("Categories").add_attribute(Attribute::Bold),
        Cell::new("Unknown").add_attribute(Attribute::Bold),
    ]);

    for column in artifact.preprocessor.categorical() {
        table.add_row(vec![
            Cell::new(&column.name).fg(Color::Cyan),
            Cell::new(&column.most_frequent),
            Cell::new(column.categories.join(", ")),
            Cell::new(column.handle_unknown),
        ]);
    }

    table
}

/// Print artifact metadata followed by the parameter tables
pub fn display_artifact(artifact: &PreprocessorArtifact) {
    let meta = &artifact.metadata;

    println!();
    println!(
        "    {} {}",
        style("🔍").cyan(),
        style("PREPROCESSOR ARTIFACT").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!("      Format version: {}", meta.format_version);
    println!("      Written by:     scoreprep v{}", meta.scoreprep_version);
    println!("      Created at:     {}", meta.created_at);
    println!(
        "      Output columns: {}",
        style(meta.feature_names.len()).yellow().bold()
    );

    println!();
    println!("    {}", style("Numeric columns").white().bold());
    for line in numeric_table(artifact).to_string().lines() {
        println!("    {}", line);
    }

    println!();
    println!("    {}", style("Categorical columns").white().bold());
    for line in categorical_table(artifact).to_string().lines() {
        println!("    {}", line);
    }
    println!();
}
