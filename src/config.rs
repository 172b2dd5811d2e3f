use crate::error::{Error, Result};

/// Cycle cap used when the caller does not pick one.
pub const DEFAULT_MAX_CYCLES: usize = 10;

/// Cycle cap used by the benchmarking profile.
pub const BENCHMARK_MAX_CYCLES: usize = 1000;

/// What the graph builder does with an edge `(v, v)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfLoopPolicy {
    /// Keep the loop. A single vertex with a loop closes a one-vertex tour.
    #[default]
    Allow,
    /// Fail the build with a self-loop defect.
    Reject,
}

/// Options for turning an edge list into an adjacency matrix.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub self_loops: SelfLoopPolicy,
    /// Also write `(b, a)` for every listed `(a, b)`.
    pub symmetrize: bool,
    /// Fixed vertex count. When `None` the count is the number of distinct ids.
    pub vertex_count: Option<usize>,
}

impl BuildOptions {
    /// Undirected build: every listed pair is written in both directions.
    pub fn undirected() -> Self {
        Self {
            symmetrize: true,
            ..Self::default()
        }
    }

    pub fn with_self_loops(mut self, policy: SelfLoopPolicy) -> Self {
        self.self_loops = policy;
        self
    }

    pub fn with_vertex_count(mut self, vertex_count: usize) -> Self {
        self.vertex_count = Some(vertex_count);
        self
    }
}

/// How start vertices are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One start vertex at a time, in increasing order, stopping at the cap.
    #[default]
    Sequential,
    /// One task per start vertex on a worker pool. `threads == None` uses the
    /// pool's default size.
    Pool { threads: Option<usize> },
}

impl Strategy {
    pub fn pool() -> Self {
        Strategy::Pool { threads: None }
    }

    pub fn pool_with_threads(threads: usize) -> Self {
        Strategy::Pool {
            threads: Some(threads),
        }
    }
}

/// Configuration for one enumeration run.
#[derive(Debug, Clone)]
pub struct EnumerationConfig {
    /// Maximum number of cycles to collect.
    pub max_cycles: usize,
    pub strategy: Strategy,
    /// Pool strategy only: stop in-flight searches once the collection is full.
    pub cancel_when_full: bool,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
            strategy: Strategy::Sequential,
            cancel_when_full: false,
        }
    }
}

impl EnumerationConfig {
    pub fn new(max_cycles: usize) -> Self {
        Self {
            max_cycles,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cancel_when_full(mut self, cancel: bool) -> Self {
        self.cancel_when_full = cancel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Strategy::Pool { threads: Some(0) } = self.strategy {
            return Err(Error::invalid_config("pool strategy needs at least one thread"));
        }
        Ok(())
    }
}
