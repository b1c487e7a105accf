//
//  edge.rs
//  Junction
//

use std::sync::{Arc, Weak};

use crate::error::{GraphError, Result};

use super::node::Node;
use super::types::EdgeState;

/// A named relation from an implicit origin node to a terminal node.
///
/// Identity — name, terminal, direction — is fixed at creation; only the
/// attached state mutates. The terminal reference is non-owning: the
/// cascading-delete protocol removes every edge terminating on a node
/// before that node is released, so a live edge always resolves to a
/// live terminal.
#[derive(Debug)]
pub struct Edge<N, E> {
    name: String,
    terminal: Weak<Node<N, E>>,
    terminal_name: String,
    directed: bool,
    state: E,
}

impl<N, E> Edge<N, E> {
    pub(crate) fn new(name: String, state: E, terminal: &Arc<Node<N, E>>, directed: bool) -> Self {
        Self {
            name,
            terminal: Arc::downgrade(terminal),
            terminal_name: terminal.name().to_string(),
            directed,
            state,
        }
    }

    /// Edge name, unique among edges of the same origin node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` permits only forward traversal.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Name of the node this edge terminates on.
    pub fn terminal_name(&self) -> &str {
        &self.terminal_name
    }

    /// Attached state.
    pub fn state(&self) -> &E {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut E {
        &mut self.state
    }

    /// Whether this edge terminates on the named node. Node names are
    /// unique per graph, so the name comparison is an identity check.
    pub(crate) fn terminates_at(&self, node_name: &str) -> bool {
        self.terminal_name == node_name
    }

    /// Upgrade the terminal reference. A live edge's terminal is kept
    /// alive by the graph; failure here is an engine bug, not a usage
    /// error.
    pub(crate) fn resolve_terminal(&self) -> Result<Arc<Node<N, E>>> {
        self.terminal.upgrade().ok_or_else(|| {
            GraphError::Internal(format!(
                "edge {} references released terminal {}",
                self.name, self.terminal_name
            ))
        })
    }
}

impl<N, E: EdgeState<N>> Edge<N, E> {
    /// Invoke the state's forward hook with `(origin, terminal)`.
    pub(crate) fn forward(&mut self, origin: &Node<N, E>) -> Result<()> {
        let terminal = self.resolve_terminal()?;
        self.state.on_forward(origin, &terminal);
        Ok(())
    }

    /// Invoke the state's reverse hook. Directed edges refuse.
    pub(crate) fn reverse(&mut self, origin: &Node<N, E>) -> Result<()> {
        if self.directed {
            return Err(GraphError::DirectedEdge(self.name.clone()));
        }
        let terminal = self.resolve_terminal()?;
        self.state.on_reverse(origin, &terminal);
        Ok(())
    }
}
