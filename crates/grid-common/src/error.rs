//! Error types for grid validation.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while turning a grid definition into a renderable shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid definition template is not a regular lat/lon grid.
    #[error("Currently not supporting grid definition template 3.{template} ({name})")]
    UnsupportedGridType { template: u16, name: &'static str },

    /// The grid is of the supported kind but cannot be rendered.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

impl GridError {
    /// Create an InvalidGrid error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Whether this is the unsupported-variant error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, GridError::UnsupportedGridType { .. })
    }
}
