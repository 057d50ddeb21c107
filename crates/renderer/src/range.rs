//! Value range detection for scalar fields.

use serde::{Deserialize, Serialize};

/// Initial running maximum; any real sample replaces it.
pub const SENTINEL_MAX: f32 = -9_999_999.0;

/// Initial running minimum; any real sample replaces it.
pub const SENTINEL_MIN: f32 = 999_999.0;

/// Minimum and maximum of a field, used to scale the colour map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The pair returned for a field with no comparable samples.
    pub fn sentinel() -> Self {
        Self {
            min: SENTINEL_MIN,
            max: SENTINEL_MAX,
        }
    }

    /// Width of the range, `max - min`.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// True when no sample was folded in (max is still below min).
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// Flat field: every sample has the same value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Scan `data` once and return its minimum and maximum.
///
/// The running bounds start at [`SENTINEL_MAX`] / [`SENTINEL_MIN`], so an
/// empty slice (or one holding only NaN) returns [`ValueRange::sentinel`].
/// Samples outside the sentinel window still win because they are compared
/// against the running values.
pub fn analyze(data: &[f32]) -> ValueRange {
    let mut max = SENTINEL_MAX;
    let mut min = SENTINEL_MIN;

    for &v in data {
        if v > max {
            max = v;
        }
        if v < min {
            min = v;
        }
    }

    ValueRange { min, max }
}
