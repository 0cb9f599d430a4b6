use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ridepath::pipe::serve;
use ridepath::{Frontier, Limits, ServiceConfig};

#[derive(Parser, Debug)]
#[command(name = "ridepath")]
#[command(about = "Answer shortest-path requests, one JSON object per line on stdin, one JSON response per line on stdout.", long_about = None)]
struct Cli {
    /// Frontier used by the search
    #[arg(short, long, value_enum, default_value = "lazy")]
    frontier: Frontier,

    /// Reject requests with more nodes than this
    #[arg(long, default_value_t = Limits::default().max_nodes)]
    max_nodes: usize,

    /// Reject requests with more edges than this
    #[arg(long, default_value_t = Limits::default().max_edges)]
    max_edges: usize,

    /// Log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ServiceConfig {
        limits: Limits {
            max_nodes: cli.max_nodes,
            max_edges: cli.max_edges,
        },
        frontier: cli.frontier,
    };
    tracing::info!(frontier = config.frontier.name(), limits = ?config.limits, "serving on stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), BufWriter::new(stdout.lock()), &config).context("serving requests")?;
    Ok(())
}
