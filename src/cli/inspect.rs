//! `inspect` subcommand - show what a persisted preprocessor learned

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::load_artifact;
use crate::report::display_artifact;

pub fn run_inspect(artifact: &Path) -> Result<()> {
    let loaded = load_artifact(artifact)
        .with_context(|| format!("Failed to inspect artifact {}", artifact.display()))?;
    display_artifact(&loaded);
    Ok(())
}
