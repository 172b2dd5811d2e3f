use std::collections::HashSet;

use bitvec::prelude::*;
use log::{trace, warn};
use num_traits::PrimInt;

use crate::config::{BuildOptions, SelfLoopPolicy};
use crate::error::{GraphDefect, Result};
use crate::graph::Vertex;

/// Square boolean matrix: `has_edge(u, v)` is true iff an edge from `u` to `v`
/// was supplied (or mirrored, for an undirected build).
///
/// Stored row-major in a single bit vector. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdjacencyMatrix {
    bits: BitVec,
    n: usize,
}

impl AdjacencyMatrix {
    /// Builds a matrix from directed pairs using the default [`BuildOptions`].
    ///
    /// The vertex count is the number of distinct ids in `edges`, and every id
    /// must fall below it. Only the listed direction is written; supply both
    /// `(a, b)` and `(b, a)` for an undirected edge.
    ///
    /// # Example
    /// ```
    /// use knotwork::graph::AdjacencyMatrix;
    ///
    /// let adjacency = AdjacencyMatrix::build(&[(0, 1), (1, 0), (1, 2)]).unwrap();
    /// assert_eq!(adjacency.len(), 3);
    /// assert!(adjacency.has_edge(1, 2));
    /// assert!(!adjacency.has_edge(2, 1));
    ///
    /// // Ids 0 and 5 are only two distinct labels, so 5 is out of range.
    /// assert!(AdjacencyMatrix::build(&[(0, 5)]).is_err());
    /// ```
    ///
    /// Ids must be integers; fractional labels are not truncated into vertices.
    /// ```compile_fail
    /// use knotwork::graph::AdjacencyMatrix;
    ///
    /// let _ = AdjacencyMatrix::build(&[(0.0, 1.9), (1.9, 0.0)]);
    /// ```
    pub fn build<I>(edges: &[(I, I)]) -> Result<Self>
    where
        I: PrimInt,
    {
        Self::build_with(edges, &BuildOptions::default())
    }

    /// Builds a matrix, honouring the vertex count, self-loop policy and
    /// symmetrization in `options`.
    pub fn build_with<I>(edges: &[(I, I)], options: &BuildOptions) -> Result<Self>
    where
        I: PrimInt,
    {
        let pairs = edges
            .iter()
            .map(|&(a, b)| -> Result<(Vertex, Vertex)> { Ok((to_vertex(a)?, to_vertex(b)?)) })
            .collect::<Result<Vec<_>>>()?;

        let n = match options.vertex_count {
            Some(n) => n,
            None => pairs
                .iter()
                .flat_map(|&(a, b)| [a, b])
                .collect::<HashSet<_>>()
                .len(),
        };

        let mut matrix = Self::empty(n)?;

        let mut seen = HashSet::with_capacity(pairs.len());
        let mut duplicates = 0usize;
        for &(a, b) in &pairs {
            for vertex in [a, b] {
                if vertex >= n {
                    return Err(GraphDefect::VertexOutOfRange {
                        vertex,
                        vertex_count: n,
                    }
                    .into());
                }
            }
            if a == b && options.self_loops == SelfLoopPolicy::Reject {
                return Err(GraphDefect::SelfLoop { vertex: a }.into());
            }
            if !seen.insert((a, b)) {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            warn!("edge list repeats {} pair(s); repeats are ignored", duplicates);
        }

        for &(a, b) in &pairs {
            matrix.set(a, b);
            if options.symmetrize {
                matrix.set(b, a);
            }
        }
        trace!(
            "built {}x{} adjacency with {} arcs",
            n,
            n,
            matrix.edge_count()
        );
        Ok(matrix)
    }

    fn empty(n: usize) -> Result<Self> {
        let cells = n
            .checked_mul(n)
            .filter(|&cells| cells <= BitSlice::<usize, Lsb0>::MAX_BITS)
            .ok_or(GraphDefect::TooManyVertices { vertex_count: n })?;
        Ok(AdjacencyMatrix {
            bits: bitvec![0; cells],
            n,
        })
    }

    fn set(&mut self, u: Vertex, v: Vertex) {
        self.bits.set(u * self.n + v, true);
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// True iff the arc `u -> v` exists. Out-of-range vertices have no arcs.
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        u < self.n && v < self.n && self.bits[u * self.n + v]
    }

    /// The row of `u` as a bit slice indexed by target vertex; empty when `u`
    /// is not a vertex.
    pub(crate) fn row(&self, u: Vertex) -> &BitSlice {
        if u >= self.n {
            return BitSlice::empty();
        }
        &self.bits[u * self.n..(u + 1) * self.n]
    }

    /// Targets of arcs leaving `u`, in increasing order. Out-of-range vertices
    /// have none.
    pub fn neighbors(&self, u: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.row(u).iter_ones()
    }

    /// Out-degree of `u`; zero for out-of-range vertices.
    pub fn degree(&self, u: Vertex) -> usize {
        self.row(u).count_ones()
    }

    /// Number of arcs; an undirected edge given in both directions counts twice.
    pub fn edge_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// True iff every arc `u -> v` has a matching `v -> u`.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|u| self.neighbors(u).all(|v| self.has_edge(v, u)))
    }
}

pub(crate) fn to_vertex<I: PrimInt>(id: I) -> Result<Vertex> {
    id.to_usize().ok_or_else(|| {
        GraphDefect::NegativeVertex {
            vertex: id.to_i64().unwrap_or(i64::MIN),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_triangle_both_directions() {
        let edges = [(0, 1), (1, 0), (1, 2), (2, 1), (2, 0), (0, 2)];
        let m = AdjacencyMatrix::build(&edges).unwrap();
        assert_eq!(m.len(), 3);
        assert!(m.is_symmetric());
        assert_eq!(m.edge_count(), 6);
        for &(a, b) in &edges {
            assert!(m.has_edge(a, b));
            assert!(m.has_edge(b, a));
        }
        assert!(!m.has_edge(0, 0));
    }

    #[test]
    fn test_single_direction_stays_directed() {
        let m = AdjacencyMatrix::build(&[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(m.has_edge(0, 1));
        assert!(!m.has_edge(1, 0));
        assert!(!m.is_symmetric());
    }

    #[test]
    fn test_symmetrize() {
        let m = AdjacencyMatrix::build_with(&[(0, 1), (1, 2)], &BuildOptions::undirected()).unwrap();
        assert!(m.is_symmetric());
        assert!(m.has_edge(1, 0));
        assert!(m.has_edge(2, 1));
        assert_eq!(m.degree(1), 2);
    }

    #[test]
    fn test_neighbors_ascending() {
        let m = AdjacencyMatrix::build(&[(0, 3), (0, 1), (0, 2), (3, 0)]).unwrap();
        assert_eq!(m.neighbors(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(m.neighbors(1).count(), 0);
    }

    #[test]
    fn test_empty_edge_list() {
        let edges: [(usize, usize); 0] = [];
        let m = AdjacencyMatrix::build(&edges).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.edge_count(), 0);
    }

    #[test]
    fn test_sparse_labels_rejected() {
        // Labels {0, 1, 4}: three distinct ids, so 4 is out of range.
        let err = AdjacencyMatrix::build(&[(0, 1), (1, 4)]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGraph(GraphDefect::VertexOutOfRange {
                vertex: 4,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_negative_id_rejected() {
        let err = AdjacencyMatrix::build(&[(0i32, 1), (-1, 0)]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGraph(GraphDefect::NegativeVertex { vertex: -1 })
        );
    }

    #[test]
    fn test_self_loop_policy() {
        let edges = [(0, 0), (0, 1), (1, 0)];
        let m = AdjacencyMatrix::build(&edges).unwrap();
        assert!(m.has_edge(0, 0));

        let options = BuildOptions::default().with_self_loops(SelfLoopPolicy::Reject);
        let err = AdjacencyMatrix::build_with(&edges, &options).unwrap_err();
        assert_eq!(err, Error::InvalidGraph(GraphDefect::SelfLoop { vertex: 0 }));
    }

    #[test]
    fn test_explicit_vertex_count() {
        let edges: [(u32, u32); 0] = [];
        let m = AdjacencyMatrix::build_with(&edges, &BuildOptions::default().with_vertex_count(2))
            .unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.degree(0), 0);

        let options = BuildOptions::default().with_vertex_count(3);
        assert!(AdjacencyMatrix::build_with(&[(0u32, 3u32)], &options).is_err());
        // Explicit count admits labels the distinct-count rule would reject.
        assert!(AdjacencyMatrix::build_with(&[(0u32, 2u32)], &options).is_ok());
    }

    #[test]
    fn test_duplicates_are_harmless() {
        let once = AdjacencyMatrix::build(&[(0, 1), (1, 0)]).unwrap();
        let twice = AdjacencyMatrix::build(&[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_build_is_idempotent() {
        let edges = [(0u8, 2u8), (2, 1), (1, 0), (0, 1)];
        let a = AdjacencyMatrix::build(&edges).unwrap();
        let b = AdjacencyMatrix::build(&edges).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_queries_out_of_range() {
        let m = AdjacencyMatrix::build(&[(0, 1), (1, 0)]).unwrap();
        assert!(!m.has_edge(0, 2));
        assert!(!m.has_edge(5, 0));
        assert_eq!(m.degree(5), 0);
        assert_eq!(m.neighbors(2).count(), 0);
    }

    #[test]
    fn test_oversized_vertex_count_rejected() {
        let edges: [(usize, usize); 0] = [];
        let options = BuildOptions::default().with_vertex_count(1usize << 33);
        let err = AdjacencyMatrix::build_with(&edges, &options).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGraph(GraphDefect::TooManyVertices {
                vertex_count: 1usize << 33
            })
        );

        let options = BuildOptions::default().with_vertex_count(usize::MAX);
        assert!(AdjacencyMatrix::build_with(&edges, &options)
            .unwrap_err()
            .is_invalid_graph());
    }

    #[test]
    fn test_any_integer_id_type() {
        let expected = AdjacencyMatrix::build(&[(0usize, 1usize), (1, 2), (2, 0)]).unwrap();
        assert_eq!(AdjacencyMatrix::build(&[(0u8, 1u8), (1, 2), (2, 0)]).unwrap(), expected);
        assert_eq!(AdjacencyMatrix::build(&[(0i16, 1i16), (1, 2), (2, 0)]).unwrap(), expected);
        assert_eq!(AdjacencyMatrix::build(&[(0u64, 1u64), (1, 2), (2, 0)]).unwrap(), expected);
        assert_eq!(AdjacencyMatrix::build(&[(0isize, 1isize), (1, 2), (2, 0)]).unwrap(), expected);
    }
}
