//! stepgraph CLI - Step-by-step graph traversal in the terminal
//!
//! Runs BFS, DFS and Dijkstra one step at a time over a small undirected,
//! weighted graph and shows the traversal state as it evolves.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use stepgraph_core::{Algorithm, NodeId};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod constants;
mod input;
mod output;

use commands::*;
use config::StepgraphConfig;
use output::{OutputConfig, OutputFormat};

/// Step through graph traversals.
///
/// Loads a small undirected weighted graph (up to 20 nodes) and runs BFS,
/// DFS or Dijkstra on it, one step at a time.
#[derive(Parser)]
#[command(name = "stepgraph")]
#[command(author, version)]
#[command(about = "Step through BFS, DFS and Dijkstra on small graphs")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  stepgraph run graph.toml --algo dijkstra   Shortest path from start to end
  stepgraph run graph.toml --algo bfs --trace
  stepgraph play graph.toml                  Interactive session
  stepgraph play                             Enter the graph at the prompts")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one traversal to completion and print the result
    Run {
        /// Graph file (.toml or .json)
        graph: PathBuf,

        /// Algorithm: bfs, dfs or dijkstra
        #[arg(short, long, default_value = "bfs")]
        algo: Algorithm,

        /// Start node (overrides the graph file)
        #[arg(short, long)]
        start: Option<NodeId>,

        /// End node (overrides the graph file)
        #[arg(short, long)]
        end: Option<NodeId>,

        /// Milliseconds between steps
        #[arg(long = "interval-ms")]
        interval_ms: Option<u64>,

        /// Print every step as it happens
        #[arg(long)]
        trace: bool,

        /// Reject edges with out-of-range endpoints instead of dropping them
        #[arg(long)]
        strict: bool,
    },

    /// Interactive session: start, pause, step and reset traversals
    #[command(visible_alias = "p")]
    Play {
        /// Graph file (.toml or .json); prompts on stdin when omitted
        graph: Option<PathBuf>,

        /// Milliseconds between auto-mode steps
        #[arg(long = "interval-ms")]
        interval_ms: Option<u64>,

        /// Start in step mode
        #[arg(long)]
        step: bool,

        /// Reject edges with out-of-range endpoints instead of dropping them
        #[arg(long)]
        strict: bool,
    },

    /// Validate a graph file
    Check {
        /// Graph file (.toml or .json)
        graph: PathBuf,

        /// Reject edges with out-of-range endpoints instead of dropping them
        #[arg(long)]
        strict: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .stepgraphrc.toml
    let config = StepgraphConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    let output = OutputConfig::detect(format, config.use_color());
    colored::control::set_override(output.color);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Run {
            graph,
            algo,
            start,
            end,
            interval_ms,
            trace,
            strict,
        } => {
            let options = run::RunOptions {
                algorithm: algo,
                start,
                end,
                interval: config.tick_interval(interval_ms),
                policy: config.edge_policy(strict),
                trace,
            };
            run::run(&graph, options, &output).await
        }
        Commands::Play {
            graph,
            interval_ms,
            step,
            strict,
        } => {
            let options = play::PlayOptions {
                interval: config.tick_interval(interval_ms),
                policy: config.edge_policy(strict),
                skip_noop_steps: config.scheduler.skip_noop_steps,
                start_in_step_mode: step || config.scheduler.start_in_step_mode,
            };
            play::run(graph.as_deref(), options, &output).await
        }
        Commands::Check { graph, strict } => {
            check::run(&graph, config.edge_policy(strict), &output)
        }
    }
}
