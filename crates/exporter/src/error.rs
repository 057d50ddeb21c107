//! Error types for field export.

use grid_common::GridError;
use renderer::PngError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ExportError.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that stop a single field from being exported.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The field's grid cannot be rendered (unsupported template or invalid
    /// dimensions). Raised before any raster work.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The raster could not be encoded.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] PngError),

    /// The encoded image could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration or parameter table.
    #[error("configuration error: {0}")]
    Config(String),

    /// The batch was cancelled before this field started.
    #[error("export cancelled")]
    Cancelled,
}

impl ExportError {
    /// Create an Io error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the field was rejected for its grid template.
    pub fn is_unsupported_grid(&self) -> bool {
        matches!(self, ExportError::Grid(e) if e.is_unsupported())
    }

    /// Short machine-readable classification, used in logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::Grid(GridError::UnsupportedGridType { .. }) => "unsupported_grid_type",
            ExportError::Grid(GridError::InvalidGrid(_)) => "invalid_grid",
            ExportError::Encode(_) => "encode",
            ExportError::Io { .. } => "io",
            ExportError::Config(_) => "config",
            ExportError::Cancelled => "cancelled",
        }
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Config(format!("YAML error: {}", err))
    }
}
