use thiserror::Error;

use crate::graph::Vertex;

/// Why an edge list could not be turned into an adjacency matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphDefect {
    /// An edge names a vertex outside the dense range `0..vertex_count`.
    #[error("vertex {vertex} is outside 0..{vertex_count}")]
    VertexOutOfRange { vertex: Vertex, vertex_count: usize },

    /// An edge names an id that cannot index a vertex at all.
    #[error("vertex id {vertex} is not a valid index")]
    NegativeVertex { vertex: i64 },

    /// The matrix for this many vertices cannot be addressed.
    #[error("{vertex_count} vertices exceed the addressable adjacency size")]
    TooManyVertices { vertex_count: usize },

    /// A self-loop was supplied while self-loops are rejected.
    #[error("self-loop on vertex {vertex}")]
    SelfLoop { vertex: Vertex },
}

/// Errors raised by graph construction, configuration and tour mapping.
///
/// Failing to find a cycle is never an error: a search that finds nothing
/// returns `None`, and an enumeration that finds fewer cycles than requested
/// returns a short collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The edge list violates the dense zero-based numbering or the self-loop policy.
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphDefect),

    /// An enumeration setting is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The worker pool for the pooled strategy could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// A tour steps between two vertices that no input edge connects.
    #[error("no edge between {from} and {to}")]
    MissingEdge { from: Vertex, to: Vertex },
}

impl Error {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// True for every construction failure of the edge list itself.
    pub fn is_invalid_graph(&self) -> bool {
        matches!(self, Error::InvalidGraph(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
