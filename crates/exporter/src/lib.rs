//! PNG export of decoded scalar fields.
//!
//! [`Exporter`] takes fields on a supported grid, colours them with the
//! configured band table and writes one image per field through an
//! [`ImageSink`]. Batch export reports a per-item [`ExportOutcome`] and
//! never aborts on a single bad field.

pub mod cancel;
pub mod config;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod sink;

pub use cancel::CancelFlag;
pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use naming::{
    sanitize_file_name, DefaultFileNamer, FileNamer, ParameterTable, UNKNOWN_PARAMETER,
};
pub use orchestrator::{BatchSummary, ExportOutcome, ExportReport, Exporter};
pub use sink::{ImageSink, PngFileSink};
