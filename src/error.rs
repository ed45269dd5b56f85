//! Error type returned at the transformation boundary.
//!
//! Internal helpers propagate `anyhow::Error` with context. Before a failure leaves
//! [`DataTransformation`](crate::pipeline::DataTransformation) it is wrapped into a
//! [`PipelineError`], which records the stage that failed and the source location
//! where the failure was caught.

use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// Boxed underlying cause of a [`PipelineError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which stage of the preprocessing run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source file missing, unreadable, or not parseable as tabular data.
    DataLoad,
    /// A configured column or the target column is absent, or the schema itself is invalid.
    Schema,
    /// Failure while fitting or applying the preprocessor.
    Transform,
    /// Failure creating the artifact directory or writing/reading the artifact.
    Persistence,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::DataLoad => "data load error",
            ErrorKind::Schema => "schema error",
            ErrorKind::Transform => "transform error",
            ErrorKind::Persistence => "persistence error",
        };
        f.write_str(name)
    }
}

/// A failure annotated with its stage and the location where it was caught.
#[derive(Debug, Error)]
#[error("Error occurred in [{file}] at the line [{line}]: {kind}: {source:#}")]
pub struct PipelineError {
    kind: ErrorKind,
    file: &'static str,
    line: u32,
    #[source]
    source: BoxError,
}

impl PipelineError {
    /// Wrap `cause`, recording the caller's file and line.
    #[track_caller]
    pub fn new(kind: ErrorKind, cause: impl Into<BoxError>) -> Self {
        let location = Location::caller();
        Self {
            kind,
            file: location.file(),
            line: location.line(),
            source: cause.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Source file in which the failure was caught.
    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Extension for tagging any `Result` with an [`ErrorKind`].
pub trait WithKind<T> {
    /// Convert the error variant into a [`PipelineError`] located at the call site.
    fn or_kind(self, kind: ErrorKind) -> Result<T, PipelineError>;
}

impl<T, E> WithKind<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn or_kind(self, kind: ErrorKind) -> Result<T, PipelineError> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(PipelineError::new(kind, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_message_contains_location_and_cause() {
        let err = PipelineError::new(ErrorKind::Schema, "column 'lunch' not found");
        let msg = err.to_string();

        assert!(msg.starts_with("Error occurred in ["));
        assert!(msg.contains("error.rs"));
        assert!(msg.contains("schema error"));
        assert!(msg.contains("column 'lunch' not found"));
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_or_kind_records_call_site() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing file",
        ));
        let expected_line = line!() + 1;
        let err = result.or_kind(ErrorKind::DataLoad).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DataLoad);
        assert_eq!(err.line(), expected_line);
        assert!(err.file().ends_with("error.rs"));
        assert_eq!(err.source().unwrap().to_string(), "missing file");
    }

    #[test]
    fn test_or_kind_passes_ok_through() {
        let result: Result<u8, std::io::Error> = Ok(7);
        assert_eq!(result.or_kind(ErrorKind::Transform).unwrap(), 7);
    }

    #[test]
    fn test_wraps_anyhow_errors() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("writer failed"));
        let err = result.or_kind(ErrorKind::Persistence).unwrap_err();

        assert!(err.to_string().contains("persistence error: writer failed"));
    }
}
