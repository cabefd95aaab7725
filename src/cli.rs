// src/cli.rs
use crate::config::EngineConfig;
use crate::forecast::predict;
use crate::indicators::compute_indicators;
use crate::models::{validate_bars, PriceBar};
use crate::processor::{run_batch, AnalysisJob, AnalysisKind};
use crate::utils::format_span;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "market-forecast-engine")]
#[command(about = "Technical indicators and statistical forecasts for daily price bars", long_about = None)]
pub struct Cli {
    /// Engine configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the indicator battery for one bar file
    Indicators {
        /// JSON array of bars
        #[arg(short, long)]
        input: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Produce the statistical forecast for one bar file
    Forecast {
        /// JSON array of bars
        #[arg(short, long)]
        input: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyse several symbols in parallel, one bar file per symbol
    Watchlist {
        /// Bar files; the file stem is used as the symbol
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// indicators, forecast or full
        #[arg(short, long, default_value = "full")]
        kind: String,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Read a JSON array of bars without checking their order or prices
pub fn read_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read bar file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse bars in {}", path.display()))
}

/// Read a JSON array of bars and check the sequence contract
pub fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let bars = read_bars(path)?;

    validate_bars(&bars).with_context(|| format!("Invalid bars in {}", path.display()))?;

    let dates: Vec<_> = bars.iter().map(|b| b.date).collect();
    info!("Loaded {} from {}", format_span(&dates), path.display());

    Ok(bars)
}

pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn symbol_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn execute_command(cli: Cli) -> Result<()> {
    let cfg = EngineConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Indicators { input, output } => {
            let bars = load_bars(&input)?;
            let series = compute_indicators(&bars, &cfg.indicators)?;
            write_json(&series, output.as_deref())
        }
        Commands::Forecast { input, output } => {
            let bars = load_bars(&input)?;
            let forecast = predict(&bars, &cfg.forecast)?;
            write_json(&forecast, output.as_deref())
        }
        Commands::Watchlist {
            inputs,
            kind,
            output,
        } => {
            // Bars are validated per symbol by run_job
            let kind = AnalysisKind::from(kind.as_str());
            let jobs = inputs
                .iter()
                .map(|path| Ok(AnalysisJob::new(symbol_of(path), kind, read_bars(path)?)))
                .collect::<Result<Vec<_>>>()?;

            let reports = run_batch(&jobs, &cfg);
            write_json(&reports, output.as_deref())
        }
    }
}
