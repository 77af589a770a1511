//! Error types for thesaurus, configuration and rendering operations.
use std::io::Error;

/// Errors surfaced by thesaurus mutation, path helpers and export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ThesaurusError {
    /// A word passed to a mutating operation was empty or whitespace only
    #[error("Word cannot be empty or whitespace")]
    EmptyWord,

    /// I/O error while reading or writing a file
    #[error("I/O error on '{0}'")]
    Io(String, #[source] Error),

    /// Failed to serialize a snapshot of the synonym index
    #[error("Failed to serialize thesaurus snapshot")]
    Export(#[from] serde_json::Error),
}

/// Errors raised while loading a [`CorrectorConfig`](crate::config::CorrectorConfig).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error reading '{0}'")]
    Io(String, #[source] Error),

    /// Configuration file is not valid JSON for the expected shape
    #[error("Failed to parse configuration")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported by a [`TextSurface`](crate::surface::TextSurface).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SurfaceError {
    /// The surface cannot apply rich formatting to the given text
    #[error("Rich formatting failed: {0}")]
    Formatting(String),

    /// The surface is gone or not accepting updates
    #[error("Text surface unavailable")]
    Unavailable,
}
