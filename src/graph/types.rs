//
//  types.rs
//  Junction
//

use serde::{Deserialize, Serialize};

use super::node::Node;

/// Behavior contract for edge state.
///
/// Traversal dispatch hands the hook references to both endpoint nodes.
/// Hooks run while the origin node's edge lock is held: they must confine
/// themselves to their own captured state, and calling back into the
/// owning graph from inside a hook can deadlock. A hook runs to
/// completion once dispatched; there is no mid-operation cancellation.
///
/// `N` is the node-state type of the graph the edge lives in. Edge
/// teardown is `Drop`.
pub trait EdgeState<N>: Sized {
    /// Invoked by forward traversal.
    fn on_forward(&mut self, origin: &Node<N, Self>, terminal: &Node<N, Self>);

    /// Invoked by reverse traversal. Only bidirectional edges dispatch
    /// this; directed edges refuse before the hook is reached.
    fn on_reverse(&mut self, origin: &Node<N, Self>, terminal: &Node<N, Self>);
}

/// Edge state with no traversal behavior.
impl<N> EdgeState<N> for () {
    fn on_forward(&mut self, _origin: &Node<N, Self>, _terminal: &Node<N, Self>) {}
    fn on_reverse(&mut self, _origin: &Node<N, Self>, _terminal: &Node<N, Self>) {}
}

/// Snapshot counters for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Nodes currently registered.
    pub node_count: usize,
    /// Edges across all origin nodes.
    pub edge_count: usize,
}
