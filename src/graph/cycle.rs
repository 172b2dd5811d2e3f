use crate::graph::{AdjacencyMatrix, Vertex};

/// A closed tour: `n + 1` vertex ids where the first and last are the start.
///
/// This is an owned snapshot taken when the search confirms a cycle; later
/// search activity never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle {
    vertices: Vec<Vertex>,
}

impl Cycle {
    pub(crate) fn from_path(path: &[Vertex]) -> Self {
        Cycle {
            vertices: path.to_vec(),
        }
    }

    /// All `n + 1` ids, closing vertex included.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn start(&self) -> Vertex {
        self.vertices[0]
    }

    /// Number of distinct vertices visited (`n`).
    pub fn len(&self) -> usize {
        self.vertices.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive `(from, to)` steps of the tour, the closing step included.
    pub fn steps(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn into_vec(self) -> Vec<Vertex> {
        self.vertices
    }

    /// True iff this is a Hamiltonian cycle of `adjacency`: every step is an
    /// arc, the tour closes on its start, and each vertex appears exactly once
    /// before the closing step.
    pub fn is_valid_for(&self, adjacency: &AdjacencyMatrix) -> bool {
        let n = adjacency.len();
        if self.vertices.len() != n + 1 || n == 0 {
            return false;
        }
        if self.vertices[0] != self.vertices[n] {
            return false;
        }
        let mut seen = vec![false; n];
        for &v in &self.vertices[..n] {
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        self.steps().all(|(u, v)| adjacency.has_edge(u, v))
    }
}

impl AsRef<[Vertex]> for Cycle {
    fn as_ref(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl From<Cycle> for Vec<Vertex> {
    fn from(cycle: Cycle) -> Self {
        cycle.vertices
    }
}
