//! Export configuration.

use crate::error::{ExportError, ExportResult};
use renderer::{BandCount, Orientation, PngMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration shared by single and batch export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory batch outputs are written to.
    pub output_dir: PathBuf,

    /// Number of colour bands (8 or 12).
    pub bands: BandCount,

    /// Grid-row to raster-row mapping.
    pub orientation: Orientation,

    /// PNG pixel layout.
    pub png_mode: PngMode,

    /// Render batch items on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            bands: BandCount::default(),
            orientation: Orientation::default(),
            png_mode: PngMode::default(),
            parallel: false,
        }
    }
}

impl ExportConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults; unparsable values are logged
    /// and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PNG_EXPORT_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PNG_EXPORT_BANDS") {
            match val.parse() {
                Ok(bands) => config.bands = bands,
                Err(e) => warn!(value = %val, error = %e, "Ignoring PNG_EXPORT_BANDS"),
            }
        }

        if let Ok(val) = std::env::var("PNG_EXPORT_ORIENTATION") {
            match val.parse() {
                Ok(orientation) => config.orientation = orientation,
                Err(e) => warn!(value = %val, error = %e, "Ignoring PNG_EXPORT_ORIENTATION"),
            }
        }

        if let Ok(val) = std::env::var("PNG_EXPORT_PNG_MODE") {
            match val.parse() {
                Ok(mode) => config.png_mode = mode,
                Err(e) => warn!(value = %val, error = %e, "Ignoring PNG_EXPORT_PNG_MODE"),
            }
        }

        if let Ok(val) = std::env::var("PNG_EXPORT_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Parse configuration from a YAML document. Missing keys keep defaults.
    pub fn from_yaml_str(yaml: &str) -> ExportResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ExportResult<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ExportError::config("output_dir must not be empty"));
        }
        Ok(())
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_bands(mut self, bands: BandCount) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_png_mode(mut self, png_mode: PngMode) -> Self {
        self.png_mode = png_mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
