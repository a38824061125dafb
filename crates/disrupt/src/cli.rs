use std::path::PathBuf;

use clap::{Parser, Subcommand};
use disrupt_core::model::{CHECKPOINT_YEARS, START_YEAR};
use disrupt_core::registry::SOCIAL_STABILITY;
use disrupt_core::{Category, DecisionRecord, InterventionId, Scenario, SimulationRequest, SnapshotMode};

use crate::config::{AppConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "disrupt")]
#[command(about = "Monte Carlo trajectories for an AI disruption scenario")]
pub struct Args {
    /// Path to the config file (default: ~/.disrupt/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Write logs to `disrupt.log` in this directory instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Request overrides shared by the simulating subcommands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunOptions {
    /// base, accelerated, regulated or collapse
    #[arg(short, long)]
    pub scenario: Option<Scenario>,

    /// Number of Monte Carlo paths
    #[arg(short, long)]
    pub paths: Option<usize>,

    /// Horizon in years after 2024
    #[arg(short, long)]
    pub years: Option<u32>,

    #[arg(long)]
    pub seed: Option<u32>,
}

impl RunOptions {
    pub fn request(&self, config: &AppConfig) -> SimulationRequest {
        SimulationRequest::new(
            self.paths.unwrap_or(config.paths),
            self.years.unwrap_or(config.years),
            self.seed.unwrap_or(config.seed),
            self.scenario.unwrap_or(config.scenario),
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in variables
    Variables {
        #[arg(long)]
        category: Option<Category>,
    },

    /// List policy interventions
    Catalog {
        /// Only interventions applicable in this phase index
        #[arg(long)]
        phase: Option<usize>,
    },

    /// Percentile bands for one variable
    Simulate {
        key: String,

        #[command(flatten)]
        run: RunOptions,

        /// Decision as YEAR:INTERVENTION, e.g. 2026:regulation_slowdown
        #[arg(long = "decision", value_parser = parse_decision)]
        decisions: Vec<DecisionRecord>,

        /// Include the first sample paths in the output
        #[arg(long)]
        samples: bool,
    },

    /// Rank every variable of a category by final median (100 paths each)
    Compare {
        category: Category,

        #[arg(short, long)]
        scenario: Option<Scenario>,

        #[arg(short, long)]
        years: Option<u32>,

        #[arg(long)]
        seed: Option<u32>,
    },

    /// Run the recommender on a hand-made snapshot
    Recommend {
        #[arg(long)]
        stability: Option<f64>,
        #[arg(long)]
        white_collar: Option<f64>,
        #[arg(long)]
        blue_collar: Option<f64>,
        #[arg(long)]
        inequality: Option<f64>,
        #[arg(long, default_value_t = 1)]
        phase: usize,
        #[arg(short, long)]
        scenario: Option<Scenario>,
    },

    /// Accept every recommendation up to a year, then simulate under the
    /// resulting decisions
    Session {
        #[arg(long, default_value_t = CHECKPOINT_YEARS[CHECKPOINT_YEARS.len() - 1])]
        until: i32,

        #[arg(long, default_value = SOCIAL_STABILITY)]
        variable: String,

        /// aggregated or placeholder
        #[arg(long, value_parser = parse_snapshot_mode)]
        snapshot: Option<SnapshotMode>,

        #[command(flatten)]
        run: RunOptions,
    },
}

/// `YEAR:INTERVENTION`
pub fn parse_decision(s: &str) -> Result<DecisionRecord, String> {
    let (year, id) = s
        .split_once(':')
        .ok_or_else(|| format!("expected YEAR:INTERVENTION, got {s:?}"))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|e| format!("invalid year {year:?}: {e}"))?;
    if year < START_YEAR {
        return Err(format!("decision year {year} is before {START_YEAR}"));
    }
    let id: InterventionId = id.trim().parse().map_err(|e| format!("{e}"))?;
    Ok(DecisionRecord::new(year, id))
}

pub fn parse_snapshot_mode(s: &str) -> Result<SnapshotMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "aggregated" => Ok(SnapshotMode::Aggregated),
        "placeholder" => Ok(SnapshotMode::Placeholder),
        other => Err(format!("unknown snapshot mode {other:?}")),
    }
}
