//! Decoded scalar fields and their classification metadata.

use crate::GridDefinition;
use serde::{Deserialize, Serialize};

/// Row-major samples of one decoded field, `value[row * width + col]`.
pub type ScalarField = Vec<f32>;

/// Classification codes of a field (GRIB2 Section 0 discipline and
/// Section 4 parameter category/number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub discipline: u8,
    pub category: u8,
    #[serde(default)]
    pub number: u8,
}

impl FieldMetadata {
    pub fn new(discipline: u8, category: u8, number: u8) -> Self {
        Self {
            discipline,
            category,
            number,
        }
    }
}

/// One field queued for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportItem {
    #[serde(flatten)]
    pub metadata: FieldMetadata,
    pub grid: GridDefinition,
    pub values: ScalarField,
}

impl ExportItem {
    pub fn new(values: ScalarField, grid: GridDefinition, metadata: FieldMetadata) -> Self {
        Self {
            metadata,
            grid,
            values,
        }
    }
}
