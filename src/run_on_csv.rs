use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, Writer};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use ridepath::cost::is_reachable;
use ridepath::{shortest_path_tree, Cost, Edge, Frontier, Graph, NodeId};

#[derive(Parser, Debug)]
#[command(name = "csv")]
#[command(about = "Build a graph from a CSV of from,to,weight rows and run shortest paths from a source node id.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: String,

    /// Node count. Defaults to the largest endpoint in the file plus one.
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Source node id
    #[arg(short, long, default_value_t = 0)]
    source: NodeId,

    /// Print the cheapest route from the source to this node
    #[arg(short, long)]
    target: Option<NodeId>,

    #[arg(short, long, value_enum, default_value = "lazy")]
    frontier: Frontier,

    /// Output CSV (node_id, distance). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Include unreachable nodes in output with distance "inf"
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,

    /// Number of timed runs from the same source
    #[arg(long, default_value_t = 1)]
    num_runs: usize,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: NodeId,
    to: NodeId,
    weight: Cost,
}

fn read_edges(path: &str) -> Result<Vec<Edge>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let mut edges = Vec::new();
    for (row, result) in rdr.deserialize::<EdgeRecord>().enumerate() {
        let record = result.with_context(|| format!("parsing row {} of {}", row + 1, path))?;
        edges.push(Edge::new(record.from, record.to, record.weight));
    }
    Ok(edges)
}

fn implied_node_count(edges: &[Edge]) -> Result<usize> {
    let Some(largest) = edges.iter().map(|e| std::cmp::max(e.from, e.to)).max() else {
        return Ok(0);
    };
    largest
        .checked_add(1)
        .with_context(|| format!("node id {} leaves no room for a node count", largest))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = match cli.verbose {
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

    let edges = read_edges(&cli.csv)?;
    let node_count = match cli.nodes {
        Some(nodes) => nodes,
        None => implied_node_count(&edges)?,
    };
    let graph = Graph::from_edges(node_count, &edges).with_context(|| format!("building graph from {}", &cli.csv))?;
    println!("Graph: {} nodes, {} directed edges", graph.node_count(), graph.edge_count());

    let mut duration_millis = Vec::with_capacity(cli.num_runs);
    let mut tree = None;
    for _ in 0..cli.num_runs.max(1) {
        let now = Instant::now();
        tree = Some(shortest_path_tree(&graph, cli.source, cli.frontier)?);
        duration_millis.push(now.elapsed().as_secs_f64() * 1000.0);
    }
    println!("{} run(s), ms: {:?}", duration_millis.len(), duration_millis);
    let Some(tree) = tree else {
        return Ok(());
    };

    if let Some(target) = cli.target {
        match tree.route_to(target)? {
            Some(route) => println!("Route {} -> {} (cost {}): {:?}", cli.source, target, route.cost.0, route.nodes),
            None => println!("No route from {} to {}", cli.source, target),
        }
    }

    if let Some(out_path) = cli.out {
        let mut wtr = Writer::from_path(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        wtr.write_record(["node_id", "distance"])?;
        let mut written = 0;
        for (node_id, &d) in tree.distances().iter().enumerate() {
            if is_reachable(d) || cli.include_unreachable {
                let val = if is_reachable(d) {
                    format!("{:.6}", d)
                } else {
                    String::from("inf")
                };
                wtr.write_record(&[node_id.to_string(), val])?;
                written += 1;
            }
        }
        wtr.flush()?;
        println!("Wrote distances for {} nodes to {}", written, out_path);
    } else {
        let reachable: Vec<Cost> = tree.distances().iter().copied().filter(|&d| is_reachable(d)).collect();
        println!("Nodes: {}", tree.distances().len());
        println!("Reachable from {}: {}", cli.source, reachable.len());
        if let Some(maxd) = reachable.into_iter().reduce(f64::max) {
            println!("Max finite distance: {:.2}", maxd);
        }
    }

    Ok(())
}
