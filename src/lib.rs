//! # Junction
//!
//! Thread-safe in-process directed graph container.
//!
//! Junction keeps a registry of named nodes, each owning a registry of
//! named outgoing edges. Nodes and edges carry arbitrary application
//! state; edges are directed or bidirectional and dispatch traversal
//! into caller-supplied hooks.
//!
//! ## Key Features
//!
//! - **Concurrent**: one lock per collection — the graph's node registry
//!   and each node's edge registry lock independently, so operations on
//!   different nodes never block each other
//! - **Bounded waits**: lock acquisition fails with a typed timeout
//!   error instead of blocking forever (configurable, capped at 120 s)
//! - **Stateful traversal**: edge state implements [`EdgeState`] and is
//!   handed both endpoint nodes on every forward or reverse crossing
//! - **Consistent deletes**: removing a node first purges every edge in
//!   the graph that terminates on it — no dangling reference is ever
//!   visible to a caller
//!
//! ## Quick Start
//!
//! ```rust
//! use junction::{DirectedGraph, EdgeState, Node};
//!
//! struct Hop {
//!     crossed: u32,
//! }
//!
//! impl EdgeState<()> for Hop {
//!     fn on_forward(&mut self, _origin: &Node<(), Self>, _terminal: &Node<(), Self>) {
//!         self.crossed += 1;
//!     }
//!     fn on_reverse(&mut self, _origin: &Node<(), Self>, _terminal: &Node<(), Self>) {}
//! }
//!
//! let graph = DirectedGraph::new();
//! graph.create_node("relay", ()).unwrap();
//! graph.create_node("sink", ()).unwrap();
//! graph.create_edge("feed", Hop { crossed: 0 }, "relay", "sink", true).unwrap();
//!
//! graph.get_node("relay").unwrap().traverse_forward("feed").unwrap();
//!
//! let crossed = graph.with_edge_state("relay", "feed", |s| s.crossed).unwrap();
//! assert_eq!(crossed, 1);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod lock;

// Re-exports for convenience
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::{DirectedGraph, Edge, EdgeState, GraphStats, Node, NodeHandle};
