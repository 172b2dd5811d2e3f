use std::collections::HashMap;

use num_traits::PrimInt;

use crate::error::{Error, Result};
use crate::graph::adjacency::to_vertex;
use crate::graph::{Cycle, Vertex};

/// Maps vertex pairs back to positions in the edge list a graph was built from.
///
/// Renderers use this to turn a tour into the mesh edges it walks along. A
/// pair matches its listed orientation first, then the reverse one; when an
/// edge is listed more than once, its first position wins.
///
/// # Example
/// ```
/// use knotwork::config::BuildOptions;
/// use knotwork::graph::{enumerate, AdjacencyMatrix, EdgeLookup};
///
/// // A mesh edge table lists each edge once.
/// let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
/// let adjacency = AdjacencyMatrix::build_with(&edges, &BuildOptions::undirected()).unwrap();
/// let cycles = enumerate(&adjacency, 1);
///
/// let lookup = EdgeLookup::new(&edges).unwrap();
/// assert_eq!(lookup.tour_edges(&cycles[0]).unwrap(), vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeLookup {
    positions: HashMap<(Vertex, Vertex), usize>,
}

impl EdgeLookup {
    pub fn new<I>(edges: &[(I, I)]) -> Result<Self>
    where
        I: PrimInt,
    {
        let mut positions = HashMap::with_capacity(edges.len());
        for (index, &(a, b)) in edges.iter().enumerate() {
            positions
                .entry((to_vertex(a)?, to_vertex(b)?))
                .or_insert(index);
        }
        Ok(EdgeLookup { positions })
    }

    /// Position of the edge joining `from` and `to`, in either orientation.
    pub fn edge_index(&self, from: Vertex, to: Vertex) -> Option<usize> {
        self.positions
            .get(&(from, to))
            .or_else(|| self.positions.get(&(to, from)))
            .copied()
    }

    /// Edge positions for every step of `cycle`, closing step included.
    pub fn tour_edges(&self, cycle: &Cycle) -> Result<Vec<usize>> {
        cycle
            .steps()
            .map(|(from, to)| {
                self.edge_index(from, to)
                    .ok_or(Error::MissingEdge { from, to })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_either_orientation() {
        let lookup = EdgeLookup::new(&[(0, 1), (2, 1)]).unwrap();
        assert_eq!(lookup.edge_index(0, 1), Some(0));
        assert_eq!(lookup.edge_index(1, 0), Some(0));
        assert_eq!(lookup.edge_index(1, 2), Some(1));
        assert_eq!(lookup.edge_index(0, 2), None);
    }

    #[test]
    fn test_listed_orientation_preferred() {
        let lookup = EdgeLookup::new(&[(1, 0), (0, 1)]).unwrap();
        assert_eq!(lookup.edge_index(0, 1), Some(1));
        assert_eq!(lookup.edge_index(1, 0), Some(0));
    }

    #[test]
    fn test_first_position_wins() {
        let lookup = EdgeLookup::new(&[(0, 1), (1, 2), (0, 1)]).unwrap();
        assert_eq!(lookup.edge_index(0, 1), Some(0));
    }

    #[test]
    fn test_missing_step() {
        let lookup = EdgeLookup::new(&[(0, 1), (1, 2)]).unwrap();
        let cycle = Cycle::from_path(&[0, 1, 2, 0]);
        assert_eq!(
            lookup.tour_edges(&cycle),
            Err(Error::MissingEdge { from: 2, to: 0 })
        );
    }

    #[test]
    fn test_narrow_integer_ids() {
        let lookup = EdgeLookup::new(&[(0u16, 1u16), (1, 2), (2, 0)]).unwrap();
        let cycle = Cycle::from_path(&[0, 2, 1, 0]);
        assert_eq!(lookup.tour_edges(&cycle).unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn test_negative_id_rejected() {
        assert!(EdgeLookup::new(&[(0i64, -3)]).unwrap_err().is_invalid_graph());
    }
}
