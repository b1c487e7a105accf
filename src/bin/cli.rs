//! Junction CLI - self-test and demonstration harness for the graph engine.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

use junction::{DirectedGraph, EdgeState, GraphConfig, GraphError, Node};

#[derive(Parser)]
#[command(name = "junction")]
#[command(about = "Junction - concurrent directed graph engine", long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: ./junction.toml)
    #[arg(short, long, default_value = "junction.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted end-to-end self-test
    Selftest,

    /// Hammer a graph with concurrent node and edge creation
    Storm {
        /// Worker threads
        #[arg(short, long, default_value = "8")]
        threads: usize,

        /// Nodes created per thread
        #[arg(short, long, default_value = "250")]
        nodes: usize,
    },
}

/// Edge state used by the harness: counts crossings in each direction.
#[derive(Default)]
struct Hop {
    forward: u32,
    reverse: u32,
}

impl EdgeState<()> for Hop {
    fn on_forward(&mut self, origin: &Node<(), Self>, terminal: &Node<(), Self>) {
        self.forward += 1;
        info!(origin = origin.name(), terminal = terminal.name(), "forward crossing");
    }

    fn on_reverse(&mut self, origin: &Node<(), Self>, terminal: &Node<(), Self>) {
        self.reverse += 1;
        info!(origin = origin.name(), terminal = terminal.name(), "reverse crossing");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = GraphConfig::load(&cli.config);

    match cli.command {
        Commands::Selftest => selftest(&config),
        Commands::Storm { threads, nodes } => storm(&config, threads, nodes),
    }
}

/// Scripted scenario: create, traverse, cascade-delete, verify.
fn selftest(config: &GraphConfig) -> Result<()> {
    let graph: DirectedGraph<(), Hop> = DirectedGraph::with_config(config);

    graph.create_node("A", ())?;
    graph.create_node("B", ())?;
    graph.create_edge("go", Hop::default(), "A", "B", true)?;
    graph.create_edge("link", Hop::default(), "B", "A", false)?;

    // Forward traversal of a directed edge works once per crossing.
    let a = graph.get_node("A")?;
    a.traverse_forward("go")?;
    let forward = graph.with_edge_state("A", "go", |s| s.forward)?;
    if forward != 1 {
        bail!("expected 1 forward crossing, saw {forward}");
    }

    // Reverse traversal of a directed edge must be refused.
    match a.traverse_reverse("go") {
        Err(GraphError::DirectedEdge(_)) => {}
        other => bail!("directed edge accepted reverse traversal: {other:?}"),
    }

    // A bidirectional edge crosses both ways.
    let b = graph.get_node("B")?;
    b.traverse_forward("link")?;
    b.traverse_reverse("link")?;
    let (forward, reverse) = graph.with_edge_state("B", "link", |s| (s.forward, s.reverse))?;
    if (forward, reverse) != (1, 1) {
        bail!("expected one crossing each way on link, saw ({forward}, {reverse})");
    }

    // Deleting B cascades: A's edge to it disappears.
    graph.delete_node("B")?;
    match graph.with_edge_state("A", "go", |_| ()) {
        Err(GraphError::EdgeNotFound { .. }) => {}
        other => bail!("edge to deleted node survived: {other:?}"),
    }

    // Bulk creation is best-effort: empties and duplicates are skipped.
    graph.create_nodes(&["A", "C", "", "D", "C"]);
    let mut names = graph.node_names()?;
    names.sort();
    if names != ["A", "C", "D"] {
        bail!("unexpected node set after bulk create: {names:?}");
    }

    let stats = graph.stats()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "selftest": "ok",
            "stats": stats,
        }))?
    );
    Ok(())
}

/// Concurrency exercise: distinct-name creation from many threads, then
/// a ring of edges, then spot-check traversals.
fn storm(config: &GraphConfig, threads: usize, nodes: usize) -> Result<()> {
    let graph: Arc<DirectedGraph<(), Hop>> = Arc::new(DirectedGraph::with_config(config));

    let workers: Vec<_> = (0..threads)
        .map(|t| {
            let g = graph.clone();
            thread::spawn(move || {
                for i in 0..nodes {
                    g.create_node(&format!("n-{t}-{i}"), ())
                        .expect("distinct names must all register");
                }
            })
        })
        .collect();
    for w in workers {
        w.join().expect("storm worker panicked");
    }

    let expected = threads * nodes;
    let names = graph.node_names()?;
    if names.len() != expected {
        bail!("expected {expected} nodes, found {}", names.len());
    }

    // Ring of directed edges across thread boundaries.
    for t in 0..threads {
        let next = (t + 1) % threads;
        graph.create_edge(
            "ring",
            Hop::default(),
            &format!("n-{t}-0"),
            &format!("n-{next}-0"),
            true,
        )?;
    }
    for t in 0..threads {
        graph.get_node(&format!("n-{t}-0"))?.traverse_forward("ring")?;
    }

    let stats = graph.stats()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "storm": "ok",
            "threads": threads,
            "nodes_per_thread": nodes,
            "stats": stats,
        }))?
    );
    Ok(())
}
