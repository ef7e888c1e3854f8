//! stratagem CLI - Command-line interface for the stratagem engine
//!
//! Reads JSON requests from a file or stdin and writes JSON responses to
//! stdout. Logs go to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use stratagem_engine::bench::benchmark_solver;
use stratagem_engine::EngineConfig;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "stratagem", version)]
#[command(about = "Game-theoretic negotiation strategy and settlement valuation")]
struct Cli {
    /// Path to a TOML engine configuration
    #[arg(short, long, global = true, env = "STRATAGEM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full analysis on a JSON request
    Analyze {
        /// Request file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Enumerate the equilibria of a payoff matrix
    Solve {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Search mixed equilibria even when pure ones exist
        #[arg(long)]
        include_mixed: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Throughput benchmarks
    Bench {
        #[command(subcommand)]
        target: BenchTarget,
    },
}

#[derive(Subcommand)]
enum BenchTarget {
    /// Solve generated 3×3 games
    Solver {
        #[arg(default_value_t = 100_000)]
        sample_size: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("stratagem=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze { input, pretty } => {
            let request = read_input(input.as_deref())?;
            let result = stratagem_case::analyze_str(&request, &config);
            emit(result, pretty)
        }
        Command::Solve {
            input,
            include_mixed,
            pretty,
        } => {
            let raw = read_input(input.as_deref())?;
            let mut request: stratagem_case::SolveRequest = match stratagem_case::parse_request(&raw) {
                Ok(request) => request,
                Err(err) => return emit::<()>(Err(err), pretty),
            };
            if include_mixed {
                request.include_mixed = Some(true);
            }
            emit(stratagem_case::solve_request(&request, &config), pretty)
        }
        Command::Bench {
            target: BenchTarget::Solver { sample_size },
        } => {
            println!("Running equilibrium solver benchmark...");
            println!("Sample size: {} games", sample_size);
            let (solves_per_sec, duration_ms) = benchmark_solver(sample_size);

            println!("Results:");
            println!("  Duration: {} ms", duration_ms);
            println!("  Throughput: {:.2} solves/sec", solves_per_sec);
            println!("  Throughput: {:.2}K solves/sec", solves_per_sec / 1_000.0);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        debug!("no config file given, using defaults");
        return Ok(EngineConfig::default());
    };
    let content = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig =
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
    info!(config = %path.display(), "config loaded");
    Ok(config)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading request {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
            Ok(buf)
        }
    }
}

/// Print the response, or the error envelope and exit with status 1
fn emit<T: Serialize>(result: stratagem_engine::Result<T>, pretty: bool) -> anyhow::Result<()> {
    let (value, failed) = match result {
        Ok(response) => (serde_json::to_value(&response)?, false),
        Err(err) => (serde_json::to_value(err.envelope())?, true),
    };
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}", text);
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
