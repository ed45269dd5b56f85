//! Persistence of the fitted preprocessor
//!
//! Objects are stored as pretty-printed JSON. Floats are written with enough
//! precision to reload bit-identical.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::preprocessor::FittedPreprocessor;

/// Version of the on-disk preprocessor layout
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Serialize `obj` to `path`, creating parent directories and replacing any existing file.
///
/// The object is written to a temporary sibling first and renamed over `path`, so a
/// failed write leaves the previous file intact.
pub fn save_object<T: Serialize>(path: &Path, obj: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let tmp_path = temp_sibling(path);
    if let Err(e) = write_json(&tmp_path, obj) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.context(format!("Failed to save object to {}", path.display())));
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(anyhow::Error::new(e)
            .context(format!("Failed to move artifact into place: {}", path.display())));
    }

    Ok(())
}

/// `dir/.name.tmp` next to `path`, so the final rename stays on one filesystem
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_json<T: Serialize>(path: &Path, obj: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create artifact file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, obj)
        .with_context(|| format!("Failed to serialize object to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write artifact file: {}", path.display()))?;
    Ok(())
}

/// Deserialize an object previously written by [`save_object`].
pub fn load_object<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open artifact file: {}", path.display()))?;
    let obj = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to deserialize object from {}", path.display()))?;
    Ok(obj)
}

/// Metadata stored alongside the fitted preprocessor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub format_version: u32,
    /// scoreprep version that wrote the artifact
    pub scoreprep_version: String,
    /// Creation timestamp (ISO 8601, UTC)
    pub created_at: String,
    pub feature_names: Vec<String>,
}

/// On-disk envelope for a fitted preprocessor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorArtifact {
    pub metadata: ArtifactMetadata,
    pub preprocessor: FittedPreprocessor,
}

/// Persist a fitted preprocessor with metadata.
pub fn save_preprocessor(path: &Path, preprocessor: &FittedPreprocessor) -> Result<()> {
    preprocessor
        .validate()
        .context("Refusing to persist an invalid preprocessor")?;
    let artifact = PreprocessorArtifact {
        metadata: ArtifactMetadata {
            format_version: ARTIFACT_FORMAT_VERSION,
            scoreprep_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now().to_rfc3339(),
            feature_names: preprocessor.feature_names_out(),
        },
        preprocessor: preprocessor.clone(),
    };
    save_object(path, &artifact)
}

/// Reload an artifact written by [`save_preprocessor`].
pub fn load_artifact(path: &Path) -> Result<PreprocessorArtifact> {
    let artifact: PreprocessorArtifact = load_object(path)?;
    if artifact.metadata.format_version != ARTIFACT_FORMAT_VERSION {
        bail!(
            "Unsupported artifact format version {} in {} (expected {})",
            artifact.metadata.format_version,
            path.display(),
            ARTIFACT_FORMAT_VERSION
        );
    }
    artifact
        .preprocessor
        .validate()
        .with_context(|| format!("Invalid preprocessor in {}", path.display()))?;
    Ok(artifact)
}

/// Reload just the fitted preprocessor from an artifact.
pub fn load_preprocessor(path: &Path) -> Result<FittedPreprocessor> {
    Ok(load_artifact(path)?.preprocessor)
}
