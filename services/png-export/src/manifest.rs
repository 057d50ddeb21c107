//! Field manifest loading.
//!
//! A manifest is a JSON array of decoded fields:
//!
//! ```json
//! [
//!   {"discipline": 0, "category": 0, "grid": {"type": "lat_lon", "ni": 4, "nj": 3},
//!    "values": [271.5, 272.0, ...]}
//! ]
//! ```

use anyhow::{Context, Result};
use grid_common::ExportItem;
use std::path::Path;

/// Parse a manifest from a JSON string.
pub fn parse(json: &str) -> Result<Vec<ExportItem>> {
    let items: Vec<ExportItem> =
        serde_json::from_str(json).context("manifest is not a JSON array of fields")?;
    Ok(items)
}

/// Load a manifest file.
pub fn load(path: &Path) -> Result<Vec<ExportItem>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid manifest {}", path.display()))
}
