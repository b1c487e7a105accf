//
//  engine.rs
//  Junction
//

use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::lock::{clamp_wait, TimedMutex, MAX_LOCK_WAIT};

use super::node::Node;
use super::normalize_name;
use super::types::GraphStats;

/// Shared handle to a node registered in a [`DirectedGraph`].
///
/// Handles stay valid after the node is deleted from its graph; stale
/// handles fail edge operations with `NodeRetired`.
pub type NodeHandle<N, E> = Arc<Node<N, E>>;

/// The concurrent directed-graph container.
///
/// Owns the node-name → node registry behind the graph lock; each node
/// owns its edge registry behind its own lock. Graph-level operations
/// acquire the graph lock, resolve node names to handles, and delegate
/// edge work to the owning node. The only composite locking sequence is
/// the cascading delete, which holds the graph lock while taking each
/// node's lock one at a time — graph before node, never two node locks
/// at once.
///
/// `N` is the node-state type, `E` the edge-state type. The graph is
/// `Sync` whenever the state types allow; share it across threads with
/// `Arc`.
pub struct DirectedGraph<N, E> {
    nodes: TimedMutex<HashMap<String, NodeHandle<N, E>>>,
    lock_wait: Duration,
}

impl<N, E> DirectedGraph<N, E> {
    /// Create a graph with the default lock wait (120 s).
    pub fn new() -> Self {
        Self::with_timeout(MAX_LOCK_WAIT)
    }

    /// Create a graph whose collection locks wait up to `lock_wait`
    /// (clamped to `[0, 120 s]`) before failing with a timeout error.
    pub fn with_timeout(lock_wait: Duration) -> Self {
        let lock_wait = clamp_wait(lock_wait);
        Self {
            nodes: TimedMutex::new(HashMap::new(), lock_wait, "nodes"),
            lock_wait,
        }
    }

    /// Create a graph from a loaded [`GraphConfig`].
    pub fn with_config(config: &GraphConfig) -> Self {
        Self::with_timeout(config.lock_wait())
    }

    /// The lock wait applied to the graph and every node it creates.
    pub fn lock_wait(&self) -> Duration {
        self.lock_wait
    }

    // ─── Node operations ────────────────────────────────────────

    /// Register a new node and return a handle to it.
    pub fn create_node(&self, name: &str, state: N) -> Result<NodeHandle<N, E>> {
        let key = normalize_name(name)?;
        let mut nodes = self.nodes.lock()?;
        match nodes.entry(key.to_string()) {
            Entry::Occupied(_) => Err(GraphError::NodeExists(key.to_string())),
            Entry::Vacant(slot) => {
                let node = Node::new(key.to_string(), state, self.lock_wait);
                let handle = Arc::clone(slot.insert(node));
                debug!(node = %key, "node created");
                Ok(handle)
            }
        }
    }

    /// Register a new node with default-constructed state.
    pub fn create_node_default(&self, name: &str) -> Result<NodeHandle<N, E>>
    where
        N: Default,
    {
        self.create_node(name, N::default())
    }

    /// Look up a node by name.
    pub fn get_node(&self, name: &str) -> Result<NodeHandle<N, E>> {
        let key = normalize_name(name)?;
        let nodes = self.nodes.lock()?;
        nodes
            .get(key)
            .cloned()
            .ok_or_else(|| GraphError::NodeNotFound(key.to_string()))
    }

    /// Whether a node with this name is registered.
    pub fn contains_node(&self, name: &str) -> Result<bool> {
        let key = normalize_name(name)?;
        let nodes = self.nodes.lock()?;
        Ok(nodes.contains_key(key))
    }

    /// Run `f` against the named node's state.
    pub fn with_node_state<R>(&self, name: &str, f: impl FnOnce(&N) -> R) -> Result<R> {
        let node = self.get_node(name)?;
        Ok(f(node.state()))
    }

    /// Delete a node, cascading: every edge elsewhere in the graph that
    /// terminates on it is removed first, then the node's own edges and
    /// state are torn down and the node is unregistered.
    pub fn delete_node(&self, name: &str) -> Result<()> {
        let key = normalize_name(name)?;
        let mut nodes = self.nodes.lock()?;
        if !nodes.contains_key(key) {
            return Err(GraphError::NodeNotFound(key.to_string()));
        }

        // Purge inbound edges on every other node. Each purge takes that
        // node's own lock while the graph lock stays held — graph before
        // node, one node lock at a time.
        let mut purged = 0;
        for (other_name, other) in nodes.iter() {
            if other_name == key {
                continue;
            }
            purged += other.purge_edges_to(key)?;
        }

        let node = nodes
            .remove(key)
            .ok_or_else(|| GraphError::Internal(format!("node {key} vanished during delete")))?;
        node.retire()?;
        info!(node = %key, inbound_purged = purged, "node deleted");
        Ok(())
    }

    /// Snapshot of the current node names.
    pub fn node_names(&self) -> Result<Vec<String>> {
        let nodes = self.nodes.lock()?;
        Ok(nodes.keys().cloned().collect())
    }

    /// Snapshot counters: registered nodes and edges across all nodes.
    pub fn stats(&self) -> Result<GraphStats> {
        let nodes = self.nodes.lock()?;
        let mut edge_count = 0;
        for node in nodes.values() {
            edge_count += node.edge_count()?;
        }
        Ok(GraphStats {
            node_count: nodes.len(),
            edge_count,
        })
    }

    // ─── Edge operations ────────────────────────────────────────

    /// Create an edge named `name` from `origin` to `terminal`.
    ///
    /// `directed == true` permits only forward traversal. Edge names are
    /// unique per origin node, not per graph. The graph lock is held
    /// through the delegation so the terminal cannot be deleted out from
    /// under the new edge.
    pub fn create_edge(
        &self,
        name: &str,
        state: E,
        origin: &str,
        terminal: &str,
        directed: bool,
    ) -> Result<()> {
        let edge = normalize_name(name)?;
        let origin_key = normalize_name(origin)?;
        let terminal_key = normalize_name(terminal)?;

        let nodes = self.nodes.lock()?;
        let origin_node = nodes
            .get(origin_key)
            .ok_or_else(|| GraphError::NodeNotFound(origin_key.to_string()))?;
        let terminal_node = nodes
            .get(terminal_key)
            .ok_or_else(|| GraphError::NodeNotFound(terminal_key.to_string()))?;
        origin_node.create_edge(edge, state, terminal_node, directed)
    }

    /// Remove and destroy an edge on its origin node.
    pub fn delete_edge(&self, origin: &str, edge: &str) -> Result<()> {
        let origin_key = normalize_name(origin)?;
        let nodes = self.nodes.lock()?;
        let origin_node = nodes
            .get(origin_key)
            .ok_or_else(|| GraphError::NodeNotFound(origin_key.to_string()))?;
        origin_node.delete_edge(edge)
    }

    /// Run `f` against the state of `edge` on `origin`.
    pub fn with_edge_state<R>(
        &self,
        origin: &str,
        edge: &str,
        f: impl FnOnce(&mut E) -> R,
    ) -> Result<R> {
        let node = self.get_node(origin)?;
        node.with_edge_state(edge, f)
    }

    // ─── Bulk operations ────────────────────────────────────────

    /// Best-effort bulk creation from a name list with default state.
    ///
    /// Nodes are created independently and concurrently; names that are
    /// empty or already registered are skipped silently. This asymmetry
    /// from the strict single-item API is deliberate: the batch reports
    /// no per-item outcome.
    pub fn create_nodes<S>(&self, names: &[S])
    where
        S: AsRef<str> + Sync,
        N: Default + Send + Sync,
        E: Send,
    {
        names.par_iter().for_each(|name| {
            if let Err(err) = self.create_node_default(name.as_ref()) {
                debug!(name = name.as_ref(), %err, "bulk create skipped node");
            }
        });
    }

    /// Best-effort bulk creation from name → state pairs. Same skip
    /// semantics as [`create_nodes`](Self::create_nodes).
    pub fn create_nodes_with<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, N)>,
        N: Send + Sync,
        E: Send,
    {
        let entries: Vec<(String, N)> = entries.into_iter().collect();
        entries.into_par_iter().for_each(|(name, state)| {
            if let Err(err) = self.create_node(&name, state) {
                debug!(name = %name, %err, "bulk create skipped node");
            }
        });
    }
}

impl<N, E> Default for DirectedGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}
