//! PNG export command-line tool.
//!
//! Reads a JSON manifest of decoded fields and writes one colour-banded PNG
//! per field.

mod manifest;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use exporter::{BatchSummary, DefaultFileNamer, ExportConfig, Exporter, ParameterTable};
use renderer::{BandCount, Orientation, PngMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "png-export")]
#[command(about = "Render decoded scalar fields to colour-banded PNG images")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Number of colour bands (8 or 12)
    #[arg(long, global = true)]
    bands: Option<BandCount>,

    /// Row orientation (flip or identity)
    #[arg(long, global = true)]
    orientation: Option<Orientation>,

    /// PNG layout (rgba or auto)
    #[arg(long, global = true)]
    png_mode: Option<PngMode>,

    /// Render batch items in parallel
    #[arg(long, global = true)]
    parallel: bool,

    /// YAML configuration file (replaces PNG_EXPORT_* environment settings)
    #[arg(long, global = true, env = "PNG_EXPORT_CONFIG")]
    config: Option<PathBuf>,

    /// YAML parameter-name overrides
    #[arg(long, global = true, env = "PNG_EXPORT_PARAMETERS")]
    parameters: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every field in the manifest into an output directory
    Batch {
        /// JSON manifest of decoded fields
        #[arg(long)]
        manifest: PathBuf,

        /// Output directory (overrides configuration)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Export one field of the manifest to a given file
    Single {
        /// JSON manifest of decoded fields
        #[arg(long)]
        manifest: PathBuf,

        /// Zero-based index of the field in the manifest
        #[arg(long, default_value = "0")]
        index: usize,

        /// Output PNG path
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Export failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Configuration file or environment first, command-line flags last.
fn load_config(args: &Args) -> Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => ExportConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ExportConfig::from_env(),
    };

    if let Some(bands) = args.bands {
        config.bands = bands;
    }
    if let Some(orientation) = args.orientation {
        config.orientation = orientation;
    }
    if let Some(png_mode) = args.png_mode {
        config.png_mode = png_mode;
    }
    if args.parallel {
        config.parallel = true;
    }
    if let Command::Batch {
        output_dir: Some(dir),
        ..
    } = &args.command
    {
        config.output_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

fn load_parameter_table(args: &Args) -> Result<ParameterTable> {
    let mut table = ParameterTable::wmo();
    if let Some(path) = &args.parameters {
        let count = table
            .merge_yaml_file(path)
            .with_context(|| format!("failed to load parameters {}", path.display()))?;
        info!(path = %path.display(), entries = count, "Loaded parameter overrides");
    }
    Ok(table)
}

/// Returns whether every requested export succeeded.
fn run(args: Args) -> Result<bool> {
    let config = load_config(&args)?;
    let table = load_parameter_table(&args)?;

    info!(
        bands = %config.bands,
        orientation = %config.orientation,
        png_mode = %config.png_mode,
        parallel = config.parallel,
        "Starting png-export"
    );

    match &args.command {
        Command::Batch { manifest, .. } => {
            let items = manifest::load(manifest)?;
            let exporter = Exporter::new(config).with_namer(DefaultFileNamer::new(table));

            let output_dir = &exporter.config().output_dir;
            std::fs::create_dir_all(output_dir)
                .with_context(|| format!("failed to create {}", output_dir.display()))?;
            let outcomes = exporter.export_all(&items);
            let summary = BatchSummary::from(outcomes.as_slice());

            println!("{}", serde_json::to_string(&summary)?);
            Ok(summary.all_succeeded())
        }
        Command::Single {
            manifest,
            index,
            output,
        } => {
            let items = manifest::load(manifest)?;
            let Some(item) = items.get(*index) else {
                bail!(
                    "index {} out of range, manifest has {} fields",
                    index,
                    items.len()
                );
            };

            let exporter = Exporter::new(config);
            let report = exporter.export_one(&item.values, &item.grid, output)?;
            info!(
                index,
                path = %report.path.display(),
                width = report.width,
                height = report.height,
                "Exported field"
            );

            println!("{}", serde_json::to_string(&report)?);
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_batch() {
        let args = parse(&[
            "png-export",
            "batch",
            "--manifest",
            "fields.json",
            "--output-dir",
            "out",
            "--bands",
            "8",
        ]);
        assert_eq!(args.bands, Some(BandCount::Eight));
        match args.command {
            Command::Batch {
                manifest,
                output_dir,
            } => {
                assert_eq!(manifest, PathBuf::from("fields.json"));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_single() {
        let args = parse(&[
            "png-export",
            "--orientation",
            "identity",
            "single",
            "--manifest",
            "fields.json",
            "--index",
            "2",
            "--output",
            "a.png",
        ]);
        assert_eq!(args.orientation, Some(Orientation::Identity));
        assert!(matches!(args.command, Command::Single { index: 2, .. }));
    }

    #[test]
    fn test_rejects_bad_band_count() {
        assert!(Args::try_parse_from([
            "png-export",
            "batch",
            "--manifest",
            "f.json",
            "--bands",
            "10"
        ])
        .is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("export.yaml");
        std::fs::write(&config_path, "bands: 12\npng_mode: rgba\noutput_dir: from-file\n")
            .unwrap();

        let args = parse(&[
            "png-export",
            "--config",
            config_path.to_str().unwrap(),
            "--png-mode",
            "auto",
            "batch",
            "--manifest",
            "f.json",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.bands, BandCount::Twelve);
        assert_eq!(config.png_mode, PngMode::Auto);
        assert_eq!(config.output_dir, PathBuf::from("from-file"));
    }

    #[test]
    fn test_batch_run_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("fields.json");
        std::fs::write(
            &manifest_path,
            r#"[
                {"discipline": 0, "category": 0, "grid": {"type": "lat_lon", "ni": 2, "nj": 1}, "values": [1.0, 2.0]},
                {"discipline": 0, "category": 2, "grid": {"type": "mercator", "ni": 2, "nj": 1}, "values": [1.0, 2.0]}
            ]"#,
        )
        .unwrap();
        let out = dir.path().join("out");

        let args = parse(&[
            "png-export",
            "--config",
            dir.path().join("missing.yaml").to_str().unwrap(),
            "batch",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ]);
        // Missing config file is a hard error.
        assert!(run(args).is_err());

        std::fs::write(dir.path().join("export.yaml"), "bands: 8\n").unwrap();
        let args = parse(&[
            "png-export",
            "--config",
            dir.path().join("export.yaml").to_str().unwrap(),
            "batch",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ]);
        assert!(!run(args).unwrap());
        assert!(out
            .join("Temperature - discipline0 category0 messageIndex0.png")
            .exists());
    }

    #[test]
    fn test_single_index_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("fields.json");
        std::fs::write(&manifest_path, "[]").unwrap();
        std::fs::write(dir.path().join("export.yaml"), "{}\n").unwrap();

        let args = parse(&[
            "png-export",
            "--config",
            dir.path().join("export.yaml").to_str().unwrap(),
            "single",
            "--manifest",
            manifest_path.to_str().unwrap(),
            "--index",
            "0",
            "--output",
            dir.path().join("x.png").to_str().unwrap(),
        ]);
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
