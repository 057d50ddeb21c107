//! Common fixtures for export tests.

use crate::generators::{create_ramp_grid, create_temperature_grid};
use grid_common::{ExportItem, FieldMetadata, GridDefinition};
use std::path::Path;
use tempfile::TempDir;

/// Temperature (discipline 0, category 0).
pub const TEMPERATURE: FieldMetadata = FieldMetadata {
    discipline: 0,
    category: 0,
    number: 0,
};

/// Momentum / wind (discipline 0, category 2).
pub const MOMENTUM: FieldMetadata = FieldMetadata {
    discipline: 0,
    category: 2,
    number: 2,
};

/// Ocean waves (discipline 10, category 0).
pub const WAVES: FieldMetadata = FieldMetadata {
    discipline: 10,
    category: 0,
    number: 3,
};

/// HRRR-style Lambert conformal grid, not renderable.
pub const LAMBERT_GRID: GridDefinition = GridDefinition::LambertConformal { nx: 8, ny: 4 };

/// Regular lat/lon item with a temperature-like field.
pub fn temperature_item(width: u32, height: u32) -> ExportItem {
    ExportItem::new(
        create_temperature_grid(width as usize, height as usize),
        GridDefinition::lat_lon(width, height),
        TEMPERATURE,
    )
}

/// Regular lat/lon item whose values run 0..width*height.
pub fn ramp_item(width: u32, height: u32, metadata: FieldMetadata) -> ExportItem {
    ExportItem::new(
        create_ramp_grid(width as usize, height as usize),
        GridDefinition::lat_lon(width, height),
        metadata,
    )
}

/// Item on a grid template the renderer rejects.
pub fn unsupported_item(metadata: FieldMetadata) -> ExportItem {
    ExportItem::new(create_ramp_grid(8, 4), LAMBERT_GRID, metadata)
}

/// Fresh temporary output directory, removed on drop.
pub fn output_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Number of `.png` files directly inside `dir`.
pub fn count_png_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "png"))
                .count()
        })
        .unwrap_or(0)
}
