//! Hamiltonian cycle enumeration for the edge skeletons of 3D meshes.
//!
//! A mesh exporter supplies an edge list; the crate builds an adjacency
//! matrix, searches for closed tours visiting every vertex exactly once, and
//! hands back an ordered, capped list of them for rendering.

pub mod config;
pub mod error;
pub mod graph;

pub use config::{
    BuildOptions, EnumerationConfig, SelfLoopPolicy, Strategy, BENCHMARK_MAX_CYCLES,
    DEFAULT_MAX_CYCLES,
};
pub use error::{Error, GraphDefect, Result};
pub use graph::{
    enumerate, find_cycle, AdjacencyMatrix, Cycle, CycleCollection, CycleCollector, EdgeLookup,
    SearchState, Vertex,
};
