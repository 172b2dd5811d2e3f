//! Hamiltonian cycle enumeration over an edge skeleton.
//!
//! The pipeline is linear: [`AdjacencyMatrix::build`] turns an edge list into a
//! matrix, [`find_cycle`] looks for one tour rooted at a given start vertex, and
//! [`CycleCollector`] tries start vertices in turn until enough tours are found.
//!
//! # Example
//! ```
//! use knotwork::graph::{enumerate, AdjacencyMatrix};
//!
//! let edges = [(0, 1), (1, 0), (1, 2), (2, 1), (2, 0), (0, 2)];
//! let adjacency = AdjacencyMatrix::build(&edges).unwrap();
//! let cycles = enumerate(&adjacency, 1);
//! assert_eq!(cycles.len(), 1);
//! assert_eq!(cycles[0].vertices(), &[0, 1, 2, 0]);
//! ```

pub mod adjacency;
pub mod collector;
pub mod cycle;
pub mod search;
pub mod tour;


/// A vertex id in the dense range `0..n`.
pub type Vertex = usize;

pub use adjacency::AdjacencyMatrix;
pub use collector::{enumerate, CycleCollection, CycleCollector};
pub use cycle::Cycle;
pub use search::{find_cycle, SearchState};
pub use tour::EdgeLookup;
