//! Common types shared by the renderer, exporter and CLI crates.
//!
//! Everything here describes a field that has already been decoded upstream:
//! the grid definition it was sampled on, the flat row-major samples, and the
//! classification codes used to name the output.

pub mod error;
pub mod field;
pub mod grid;

pub use error::{GridError, GridResult};
pub use field::{ExportItem, FieldMetadata, ScalarField};
pub use grid::{GridDefinition, GridShape};
