//! Destination of rendered rasters.

use crate::error::{ExportError, ExportResult};
use renderer::{png, PngMode, RasterImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Encodes a raster and stores it at a path.
pub trait ImageSink: Send + Sync {
    fn write(&self, raster: &RasterImage, path: &Path) -> ExportResult<()>;
}

/// Writes rasters as PNG files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PngFileSink {
    mode: PngMode,
}

impl PngFileSink {
    pub fn new(mode: PngMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PngMode {
        self.mode
    }
}

impl ImageSink for PngFileSink {
    fn write(&self, raster: &RasterImage, path: &Path) -> ExportResult<()> {
        let bytes = png::encode(raster, self.mode)?;

        let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&bytes)
            .map_err(|e| ExportError::io(path, e))?;
        writer.flush().map_err(|e| ExportError::io(path, e))?;

        debug!(
            path = %path.display(),
            bytes = bytes.len(),
            mode = %self.mode,
            "Wrote PNG"
        );
        Ok(())
    }
}
