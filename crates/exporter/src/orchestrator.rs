//! Single-field and batch export.
//!
//! For each field: grid check, range analysis, raster build, then the
//! [`ImageSink`]. A batch never aborts on a bad field; every item gets an
//! [`ExportOutcome`] in input order.

use crate::cancel::CancelFlag;
use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::naming::{DefaultFileNamer, FileNamer};
use crate::sink::{ImageSink, PngFileSink};
use grid_common::{ExportItem, FieldMetadata, GridDefinition};
use rayon::prelude::*;
use renderer::{analyze, ColorMapper, RasterBuilder, RasterFill, RasterImage};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Result of one successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
    pub fill: RasterFill,
}

/// Per-item result of a batch.
#[derive(Debug)]
pub struct ExportOutcome {
    pub index: usize,
    pub metadata: FieldMetadata,
    pub result: ExportResult<ExportReport>,
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ExportError> {
        self.result.as_ref().err()
    }
}

/// Counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successful exports written as blank images (length mismatch).
    pub blank: usize,
    pub cancelled: usize,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl From<&[ExportOutcome]> for BatchSummary {
    fn from(outcomes: &[ExportOutcome]) -> Self {
        let mut summary = BatchSummary {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(report) => {
                    summary.succeeded += 1;
                    if matches!(report.fill, RasterFill::Blank { .. }) {
                        summary.blank += 1;
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    if matches!(e, ExportError::Cancelled) {
                        summary.cancelled += 1;
                    }
                }
            }
        }
        summary
    }
}

/// Renders scalar fields and hands them to an [`ImageSink`].
#[derive(Clone)]
pub struct Exporter {
    config: ExportConfig,
    builder: RasterBuilder,
    sink: Arc<dyn ImageSink>,
    namer: Arc<dyn FileNamer>,
    cancel: CancelFlag,
}

impl Exporter {
    /// Exporter writing PNG files named by [`DefaultFileNamer`].
    pub fn new(config: ExportConfig) -> Self {
        let builder = RasterBuilder::new(ColorMapper::new(config.bands), config.orientation);
        let sink = PngFileSink::new(config.png_mode);
        Self {
            config,
            builder,
            sink: Arc::new(sink),
            namer: Arc::new(DefaultFileNamer::default()),
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl ImageSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn with_namer(mut self, namer: impl FileNamer + 'static) -> Self {
        self.namer = Arc::new(namer);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render a field to a raster without writing it.
    pub fn render(&self, field: &[f32], grid: &GridDefinition) -> ExportResult<RasterImage> {
        // Reject unsupported templates before scanning the values.
        let shape = grid.shape()?;
        let range = analyze(field);
        debug!(
            width = shape.width(),
            height = shape.height(),
            min = range.min,
            max = range.max,
            "Analyzed field"
        );
        Ok(self.builder.build(field, shape, range))
    }

    /// Render a field and write it to `path`.
    pub fn export_one(
        &self,
        field: &[f32],
        grid: &GridDefinition,
        path: &Path,
    ) -> ExportResult<ExportReport> {
        let raster = self.render(field, grid)?;
        self.sink.write(&raster, path)?;
        Ok(ExportReport {
            path: path.to_path_buf(),
            width: raster.width(),
            height: raster.height(),
            fill: raster.fill(),
        })
    }

    /// Output path of the `index`-th item.
    pub fn output_path(&self, index: usize, metadata: &FieldMetadata) -> PathBuf {
        self.config
            .output_dir
            .join(self.namer.file_name(index, metadata))
    }

    /// Export one batch item to its named path under `output_dir`.
    pub fn export_item(&self, index: usize, item: &ExportItem) -> ExportOutcome {
        let result = if self.cancel.is_cancelled() {
            Err(ExportError::Cancelled)
        } else {
            let path = self.output_path(index, &item.metadata);
            self.export_one(&item.values, &item.grid, &path)
        };

        match &result {
            Ok(report) => info!(
                index,
                discipline = item.metadata.discipline,
                category = item.metadata.category,
                path = %report.path.display(),
                width = report.width,
                height = report.height,
                blank = matches!(report.fill, RasterFill::Blank { .. }),
                "Exported field"
            ),
            Err(ExportError::Cancelled) => debug!(index, "Skipped field after cancellation"),
            Err(e) => error!(
                index,
                discipline = item.metadata.discipline,
                category = item.metadata.category,
                kind = e.kind(),
                error = %e,
                "Failed to export field"
            ),
        }

        ExportOutcome {
            index,
            metadata: item.metadata,
            result,
        }
    }

    /// Export every item. Outcomes are returned in input order, one per item.
    pub fn export_all(&self, items: &[ExportItem]) -> Vec<ExportOutcome> {
        let start = Instant::now();
        info!(
            items = items.len(),
            parallel = self.config.parallel,
            output_dir = %self.config.output_dir.display(),
            "Starting batch export"
        );

        let outcomes: Vec<ExportOutcome> = if self.config.parallel {
            items
                .par_iter()
                .enumerate()
                .map(|(index, item)| self.export_item(index, item))
                .collect()
        } else {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| self.export_item(index, item))
                .collect()
        };

        let summary = BatchSummary::from(outcomes.as_slice());
        if summary.cancelled > 0 {
            warn!(cancelled = summary.cancelled, "Batch cancelled before completion");
        }
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            blank = summary.blank,
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch export complete"
        );

        outcomes
    }
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("config", &self.config)
            .field("builder", &self.builder)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
