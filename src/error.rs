//
//  error.rs
//  Junction
//

use std::time::Duration;

/// Errors surfaced by the graph engine.
///
/// Every public operation either returns a valid result or fails with
/// exactly one of these; validation runs before any mutation, so a
/// failed call leaves the graph unchanged.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A required identifier was empty or whitespace-only.
    #[error("name is empty or whitespace-only")]
    EmptyName,

    /// The referenced node is not registered in the graph.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A node with this name is already registered.
    #[error("node already exists: {0}")]
    NodeExists(String),

    /// The referenced edge does not exist on its origin node.
    #[error("edge not found: {edge} (origin {node})")]
    EdgeNotFound { node: String, edge: String },

    /// An edge with this name already originates at this node.
    #[error("edge already exists: {edge} (origin {node})")]
    EdgeExists { node: String, edge: String },

    /// A collection lock could not be acquired within its wait bound.
    #[error("timed out after {waited:?} waiting for the {collection} lock")]
    LockTimeout { collection: String, waited: Duration },

    /// Reverse traversal was attempted on a directed edge.
    #[error("edge {0} is directed; reverse traversal is not permitted")]
    DirectedEdge(String),

    /// The node was deleted from its graph; the handle is stale.
    #[error("node {0} has been deleted from its graph")]
    NodeRetired(String),

    /// An internal collection was in a state the engine guarantees
    /// impossible. Indicates a bug in the engine, not a usage error.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
