//! Backtracking search for a single Hamiltonian cycle rooted at a start vertex.
//!
//! The descent is driven by an explicit stack of `(vertex, next candidate)`
//! frames instead of the call stack, so meshes with thousands of vertices do
//! not overflow it. Each step follows the same order of checks:
//!
//! 1. a vertex reached at depth `n` that equals the start closes the tour;
//! 2. otherwise an already visited vertex rejects the branch;
//! 3. otherwise the vertex is marked and placed at `path[depth]`, and its
//!    neighbours are tried in increasing order;
//! 4. when every neighbour fails, the vertex is unmarked and the frame popped.
//!
//! Check 1 runs before check 2, which is what lets the tour revisit its start.
//! Slots of the path buffer are left stale on backtrack; a successful descent
//! overwrites every slot before the snapshot is taken.

use std::sync::atomic::{AtomicBool, Ordering};

use bitvec::prelude::*;

use crate::graph::{AdjacencyMatrix, Cycle, Vertex};

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: Vertex,
    next: Vertex,
}

enum Step {
    Closed,
    Rejected,
    Placed,
}

/// Per-attempt scratch space: visited marks, the path buffer and the frame stack.
///
/// One state can serve many attempts in a row; every attempt starts by
/// clearing the visited marks. Concurrent attempts each need their own state.
#[derive(Debug, Clone)]
pub struct SearchState {
    visited: BitVec,
    path: Vec<Vertex>,
    frames: Vec<Frame>,
}

impl SearchState {
    /// Scratch space for graphs with `n` vertices.
    ///
    /// # Panics
    /// Panics if `n + 1` path slots cannot be allocated; any `n` taken from a
    /// built [`AdjacencyMatrix`] fits.
    pub fn new(n: usize) -> Self {
        SearchState {
            visited: bitvec![0; n],
            path: vec![0; n.saturating_add(1)],
            frames: Vec::with_capacity(n),
        }
    }

    /// Clears the visited marks and the frame stack.
    pub fn reset(&mut self) {
        self.visited.fill(false);
        self.frames.clear();
    }

    fn fit(&mut self, n: usize) {
        if self.visited.len() != n {
            *self = SearchState::new(n);
        }
    }

    /// Looks for a Hamiltonian cycle of `adjacency` starting and ending at `start`.
    ///
    /// Returns `None` when no such cycle exists from this root, or when
    /// `start` is not a vertex of the graph.
    pub fn find(&mut self, adjacency: &AdjacencyMatrix, start: Vertex) -> Option<Cycle> {
        self.search(adjacency, start, None)
    }

    /// Like [`find`](Self::find), but gives up with `None` as soon as `cancel`
    /// is observed set. The flag is checked before every step.
    pub fn find_until(
        &mut self,
        adjacency: &AdjacencyMatrix,
        start: Vertex,
        cancel: &AtomicBool,
    ) -> Option<Cycle> {
        self.search(adjacency, start, Some(cancel))
    }

    fn search(
        &mut self,
        adjacency: &AdjacencyMatrix,
        start: Vertex,
        cancel: Option<&AtomicBool>,
    ) -> Option<Cycle> {
        let n = adjacency.len();
        if start >= n {
            return None;
        }
        self.fit(n);
        self.reset();

        if is_cancelled(cancel) {
            return None;
        }
        // A fresh root at depth 0 is always placed.
        self.enter(start, 0, start, n);

        while let Some(depth) = self.frames.len().checked_sub(1) {
            if is_cancelled(cancel) {
                return None;
            }
            let Frame { vertex, next } = self.frames[depth];
            match adjacency.row(vertex)[next..].first_one() {
                None => {
                    self.visited.set(vertex, false);
                    self.frames.pop();
                }
                Some(offset) => {
                    let candidate = next + offset;
                    self.frames[depth].next = candidate + 1;
                    match self.enter(candidate, depth + 1, start, n) {
                        Step::Closed => {
                            debug_assert!(adjacency.has_edge(self.path[n - 1], start));
                            return Some(Cycle::from_path(&self.path));
                        }
                        Step::Rejected | Step::Placed => {}
                    }
                }
            }
        }
        None
    }

    fn enter(&mut self, vertex: Vertex, depth: usize, start: Vertex, n: usize) -> Step {
        if depth == n && vertex == start {
            self.path[depth] = vertex;
            return Step::Closed;
        }
        if self.visited[vertex] {
            return Step::Rejected;
        }
        self.visited.set(vertex, true);
        self.path[depth] = vertex;
        self.frames.push(Frame { vertex, next: 0 });
        Step::Placed
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Looks for one Hamiltonian cycle rooted at `start`.
///
/// # Example
/// ```
/// use knotwork::graph::{find_cycle, AdjacencyMatrix};
///
/// let square = [(0, 1), (1, 0), (1, 2), (2, 1), (2, 3), (3, 2), (3, 0), (0, 3)];
/// let adjacency = AdjacencyMatrix::build(&square).unwrap();
/// let cycle = find_cycle(&adjacency, 2).unwrap();
/// assert_eq!(cycle.vertices(), &[2, 1, 0, 3, 2]);
///
/// let path = [(0, 1), (1, 0), (1, 2), (2, 1)];
/// let adjacency = AdjacencyMatrix::build(&path).unwrap();
/// assert!(find_cycle(&adjacency, 0).is_none());
/// ```
pub fn find_cycle(adjacency: &AdjacencyMatrix, start: Vertex) -> Option<Cycle> {
    SearchState::new(adjacency.len()).find(adjacency, start)
}
