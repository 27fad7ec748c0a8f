//! Command-line driver for the weft generator.
//!
//! ```bash
//! # Generate every unit of a snapshot into a directory
//! weft generate snapshot.xml --out generated/
//!
//! # Fail if the checked-in units are out of date
//! weft generate snapshot.xml --out generated/ --check
//!
//! # Print the classification of every candidate declaration
//! weft inspect snapshot.xml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use weft::{GeneratorConfig, Pipeline, Severity};

#[derive(Parser)]
#[command(name = "weft", about = "Partial-type code synthesis", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML generator configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate compilation units
    Generate {
        /// Snapshot XML file
        snapshot: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Only check that the output directory is up to date
        #[arg(long)]
        check: bool,
    },

    /// Print classification flags, members and diagnostics
    Inspect {
        /// Snapshot XML file
        snapshot: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            snapshot,
            out,
            check,
        } => generate(&snapshot, &out, check, config),
        Commands::Inspect { snapshot } => inspect(&snapshot, &config),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_snapshot(path: &Path) -> Result<weft::Snapshot> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot = weft::parse_snapshot(&xml)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    weft::schema::validate_snapshot(&snapshot).context("invalid snapshot")?;
    Ok(snapshot)
}

fn generate(snapshot: &Path, out: &Path, check: bool, config: GeneratorConfig) -> Result<ExitCode> {
    let snapshot = load_snapshot(snapshot)?;
    let report = Pipeline::new(config).run(&snapshot);

    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }

    if check {
        let stale = report.stale_units(out)?;
        for path in &stale {
            eprintln!("out of date: {}", path.display());
        }
        if !stale.is_empty() {
            return Ok(ExitCode::FAILURE);
        }
    } else {
        let written = report
            .write_units(out)
            .with_context(|| format!("failed to write units to {}", out.display()))?;
        println!("wrote {} unit(s) to {}", written.len(), out.display());
    }

    let errors = report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    if errors > 0 {
        eprintln!("{errors} declaration error(s)");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn inspect(snapshot: &Path, config: &GeneratorConfig) -> Result<ExitCode> {
    let snapshot = load_snapshot(snapshot)?;
    let analysis = weft::analyze(&snapshot, config);
    print!("{}", weft::inspect::describe(&analysis));
    Ok(ExitCode::SUCCESS)
}
