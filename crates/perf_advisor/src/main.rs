//! React Render-Performance Advisor
//!
//! A machine learning-based tool that suggests optimization techniques
//! for React components from their render-performance metrics.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// React Render-Performance Advisor
#[derive(Parser)]
#[command(name = "perf-advisor")]
#[command(about = "Suggests React render optimizations from profiler metrics")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the classifier on a performance log file
    Train {
        /// Path to the JSON performance log file
        #[arg(short, long)]
        logs: Option<PathBuf>,

        /// Directory to write the trained artifacts to
        #[arg(short, long)]
        model_dir: Option<PathBuf>,

        /// Fraction of samples held out for evaluation
        #[arg(long, default_value = "0.2")]
        test_ratio: f32,

        /// Seed for the train/test shuffle
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Maximum tree depth (unlimited if omitted)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Predict the optimization for a JSON feature vector or object
    Predict {
        /// JSON-encoded features: an array of five numbers in the order
        /// `[actualDuration, renderTime, stateUpdates, propsReceived,
        /// propsUsed]`, or an object keyed by those names
        features: String,

        /// Directory containing the trained artifacts
        #[arg(short, long)]
        model_dir: Option<PathBuf>,
    },

    /// Suggest an optimization for a component from its latest log entry
    Analyze {
        /// Component name as logged by the profiler
        #[arg(short, long)]
        component: String,

        /// Path to the JSON performance log file
        #[arg(short, long)]
        logs: Option<PathBuf>,

        /// Directory containing the trained artifacts
        #[arg(short, long)]
        model_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so stdout carries only prediction output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_env();

    match cli.command {
        Commands::Train {
            logs,
            model_dir,
            test_ratio,
            seed,
            max_depth,
        } => {
            let logs = logs.unwrap_or_else(|| config.logs_path.clone());
            let model_dir = model_dir.unwrap_or_else(|| config.model_dir.clone());
            commands::train::run(&logs, &model_dir, test_ratio, seed, max_depth)?;
        }
        Commands::Predict {
            features,
            model_dir,
        } => {
            let model_dir = model_dir.unwrap_or_else(|| config.model_dir.clone());
            commands::predict::run(&features, &model_dir)?;
        }
        Commands::Analyze {
            component,
            logs,
            model_dir,
        } => {
            let logs = logs.unwrap_or_else(|| config.logs_path.clone());
            let model_dir = model_dir.unwrap_or_else(|| config.model_dir.clone());
            commands::analyze::run(&component, &logs, &model_dir)?;
        }
    }

    Ok(())
}
