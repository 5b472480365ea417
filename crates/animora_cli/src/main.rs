//! Animora CLI
//!
//! Run animation scenarios headlessly and report the outcome.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use animora_headless::{run_loaded_scenario, HeadlessRunConfig, HeadlessScenario};
use config::AnimoraConfig;

#[derive(Parser)]
#[command(name = "animora")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animora headless animation runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file or directory containing animora.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Write the JSON report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Logical milliseconds per frame
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Viewport width
        #[arg(long)]
        width: Option<u32>,

        /// Viewport height
        #[arg(long)]
        height: Option<u32>,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },

    /// Parse a scenario file without running it
    Check {
        /// Scenario JSON file
        scenario: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AnimoraConfig::load(&cli.config)?;

    match cli.command {
        Commands::Run {
            scenario,
            report,
            tick_ms,
            width,
            height,
            pretty,
        } => {
            let runtime = HeadlessRunConfig {
                width: width.unwrap_or(config.runtime.width),
                height: height.unwrap_or(config.runtime.height),
                tick_ms: tick_ms.unwrap_or(config.runtime.tick_ms),
            };
            let report_path = report.or(config.report.path);
            let failed = cmd_run(
                &scenario,
                runtime,
                report_path.as_deref(),
                pretty || config.report.pretty,
            )?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Check { scenario } => cmd_check(&scenario),

        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Returns true if the scenario failed
fn cmd_run(
    path: &Path,
    runtime: HeadlessRunConfig,
    report_path: Option<&Path>,
    pretty: bool,
) -> Result<bool> {
    let scenario = HeadlessScenario::from_path(path)?;
    info!(
        "Running {} ({} steps, {}x{} @ {}ms)",
        path.display(),
        scenario.steps.len(),
        runtime.width,
        runtime.height,
        runtime.tick_ms
    );

    let outcome = run_loaded_scenario(&scenario, runtime)
        .with_context(|| format!("Failed to run {}", path.display()))?;
    let report = outcome.report();

    match report_path {
        Some(out) => {
            report.write_to_path(out, pretty)?;
            info!("Report written to {}", out.display());
        }
        None => report.write_to_writer(&mut std::io::stdout().lock(), pretty)?,
    }

    if outcome.is_failed() {
        info!(
            "FAILED at step {}: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("")
        );
    } else {
        info!(
            "Passed in {} frames ({}ms logical)",
            report.elapsed_frames, report.elapsed_ms
        );
    }
    Ok(outcome.is_failed())
}

fn cmd_check(path: &Path) -> Result<()> {
    let scenario = HeadlessScenario::from_path(path)?;
    info!(
        "{}: {} element(s), {} step(s)",
        path.display(),
        scenario.elements.len(),
        scenario.steps.len()
    );
    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("  {index}: {}", step.name());
    }
    Ok(())
}
