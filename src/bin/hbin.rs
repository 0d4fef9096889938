//! hbin - Schedule File Tool
//!
//! Konversi dan analisis file jadwal `.hbin` / `.json`.
//!
//! Usage:
//!   hbin convert horario.json horario.hbin
//!   hbin inspect horario.hbin
//!   hbin compare horario.hbin
//!
//! Environment:
//!   RUST_LOG  Log filter (default: info, atau debug dengan --verbose)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use horario::core::storage::{self, default_file_name, FileFormat};
use horario::protocol::{compare_formats, inspect};

#[derive(Parser)]
#[command(name = "hbin", about = "Convert and inspect weekly schedule files", version)]
struct Cli {
    /// Verbose output (debug logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert between .json and .hbin/.bin (format from file extension).
    Convert {
        /// Input file.
        input: PathBuf,
        /// Output file. Defaults to horario_<date>.hbin (or .json for binary input).
        output: Option<PathBuf>,
        /// Keep the timestamp stored in the input instead of stamping the current time.
        #[arg(long)]
        keep_timestamp: bool,
    },
    /// Print header and slot statistics of a binary file.
    Inspect {
        /// Binary schedule file.
        file: PathBuf,
    },
    /// Compare JSON and binary sizes for a schedule file.
    Compare {
        /// Schedule file (.json, .hbin or .bin).
        file: PathBuf,
    },
}

/// Tool configuration
struct ToolConfig {
    log_filter: String,
    keep_timestamp: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            keep_timestamp: false,
        }
    }
}

impl ToolConfig {
    fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        if cli.verbose {
            config.log_filter = "debug".to_string();
        }
        if let Command::Convert { keep_timestamp, .. } = cli.command {
            config.keep_timestamp = keep_timestamp;
        }
        config
    }
}

fn init_logging(config: &ToolConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn convert(config: &ToolConfig, input: &Path, output: Option<&Path>) -> Result<()> {
    let mut bundle = storage::load(input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    if !config.keep_timestamp {
        bundle = bundle.stamped();
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let format = match FileFormat::from_path(input)? {
                FileFormat::Json => FileFormat::Binary,
                FileFormat::Binary => FileFormat::Json,
            };
            PathBuf::from(default_file_name(format, bundle.timestamp))
        }
    };

    let written = storage::save(&output, &bundle)
        .with_context(|| format!("failed to save {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = written,
        "conversion complete"
    );
    println!("✅ {} → {} ({} bytes)", input.display(), output.display(), written);
    Ok(())
}

fn inspect_file(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let summary =
        inspect(&bytes).with_context(|| format!("invalid binary file {}", file.display()))?;

    println!("🔬 {}", file.display());
    println!("{}", summary);
    Ok(())
}

fn compare_file(file: &Path) -> Result<()> {
    let bundle =
        storage::load(file).with_context(|| format!("failed to load {}", file.display()))?;
    let cmp = compare_formats(&bundle)?;

    println!("📊 {}", file.display());
    println!("{}", cmp);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ToolConfig::from_cli(&cli);
    init_logging(&config);

    match &cli.command {
        Command::Convert { input, output, .. } => convert(&config, input, output.as_deref()),
        Command::Inspect { file } => inspect_file(file),
        Command::Compare { file } => compare_file(file),
    }
}
