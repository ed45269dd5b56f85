//! scoreprep: preprocessing CLI
//!
//! Fits the student-performance preprocessor on a training split, transforms the
//! train and test splits, and persists the fitted preprocessor.

use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;
use console::style;

use scoreprep::cli::{inspect::run_inspect, Cli, Commands};
use scoreprep::pipeline::{save_array, DataTransformation};
use scoreprep::report::TransformationSummary;
use scoreprep::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success, RunLog,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Inspect { artifact } => run_inspect(artifact),
        };
    }

    let (train_path, test_path) = cli.splits().ok_or_else(|| {
        anyhow!("Both --train and --test are required. Use --train <FILE> --test <FILE>.")
    })?;

    // One log file per run, installed before any pipeline code emits events
    let run_log = RunLog::create(&cli.log_dir)?;
    run_log.install()?;

    let config = cli.transformation_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        train_path,
        test_path,
        &config.schema.target_column,
        &config.artifact_path,
        run_log.path(),
    );

    // Step 1: Fit on train, transform both splits, persist
    print_step_header(1, "Fit & Transform");

    let step_start = Instant::now();
    let target_column = config.schema.target_column.clone();
    let transformation = DataTransformation::new(config);
    let spinner = create_spinner("Fitting preprocessor on the train split...");
    let output = match transformation.transform(train_path, test_path) {
        Ok(output) => {
            finish_with_success(&spinner, "Preprocessor fitted and applied");
            output
        }
        Err(e) => {
            finish_with_error(&spinner, "Transformation failed");
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };
    print_success(&format!("Saved preprocessor to {}", output.artifact_path.display()));
    println!(
        "      Output feature columns: {}",
        style(output.feature_names.len()).yellow().bold()
    );

    let mut summary = TransformationSummary::from_output(&output);
    let transform_elapsed = step_start.elapsed();
    summary.set_transform_time(transform_elapsed);
    print_step_time(transform_elapsed);

    // Step 2: Optional export of transformed arrays
    print_step_header(2, "Export Arrays");

    if let Some(dir) = &cli.save_arrays {
        let step_start = Instant::now();
        let spinner = create_spinner("Writing transformed arrays...");

        let mut header = output.feature_names.clone();
        header.push(target_column);
        save_array(&output.train, &header, &dir.join("train_array.csv"))?;
        save_array(&output.test, &header, &dir.join("test_array.csv"))?;
        tracing::info!("Exported transformed arrays to {}", dir.display());

        finish_with_success(&spinner, &format!("Saved arrays to {}", dir.display()));
        let export_elapsed = step_start.elapsed();
        summary.set_export(dir.clone(), export_elapsed);
        print_step_time(export_elapsed);
    } else {
        print_info("Array export not requested (use --save-arrays <DIR>)");
    }

    summary.display();
    print_completion();

    Ok(())
}
