use std::ops::Index;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use rayon::prelude::*;

use crate::config::{EnumerationConfig, Strategy};
use crate::error::{Error, Result};
use crate::graph::{AdjacencyMatrix, Cycle, SearchState, Vertex};

/// Ordered, capped list of cycles found during one enumeration run.
///
/// Appends past the cap are refused, so `len() <= max_cycles()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleCollection {
    cycles: Vec<Cycle>,
    max_cycles: usize,
}

impl CycleCollection {
    pub fn new(max_cycles: usize) -> Self {
        CycleCollection {
            cycles: Vec::new(),
            max_cycles,
        }
    }

    /// Appends `cycle` unless the collection is full. Returns whether it was kept.
    pub fn push(&mut self, cycle: Cycle) -> bool {
        if self.is_full() {
            return false;
        }
        self.cycles.push(cycle);
        true
    }

    pub fn is_full(&self) -> bool {
        self.cycles.len() >= self.max_cycles
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn max_cycles(&self) -> usize {
        self.max_cycles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cycle> {
        self.cycles.iter()
    }

    pub fn as_slice(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Empties the collection and sets a new cap, keeping the allocation.
    pub fn reset(&mut self, max_cycles: usize) {
        self.cycles.clear();
        self.max_cycles = max_cycles;
    }

    pub fn into_vec(self) -> Vec<Cycle> {
        self.cycles
    }
}

impl Index<usize> for CycleCollection {
    type Output = Cycle;

    fn index(&self, index: usize) -> &Cycle {
        &self.cycles[index]
    }
}

impl<'a> IntoIterator for &'a CycleCollection {
    type Item = &'a Cycle;
    type IntoIter = std::slice::Iter<'a, Cycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.iter()
    }
}

impl IntoIterator for CycleCollection {
    type Item = Cycle;
    type IntoIter = std::vec::IntoIter<Cycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.into_iter()
    }
}

/// Runs the cycle search from successive start vertices until the configured
/// number of cycles is collected or every vertex has been tried.
///
/// # Example
/// ```
/// use knotwork::config::{EnumerationConfig, Strategy};
/// use knotwork::graph::{AdjacencyMatrix, CycleCollector};
///
/// let edges = [(0, 1), (1, 0), (1, 2), (2, 1), (2, 0), (0, 2)];
/// let adjacency = AdjacencyMatrix::build(&edges).unwrap();
///
/// let collector = CycleCollector::new(EnumerationConfig::new(2)).unwrap();
/// let cycles = collector.enumerate(&adjacency).unwrap();
/// assert_eq!(cycles.len(), 2);
/// assert_eq!(cycles[1].vertices(), &[1, 0, 2, 1]);
///
/// let pooled = EnumerationConfig::new(10).with_strategy(Strategy::pool_with_threads(2));
/// let cycles = CycleCollector::new(pooled).unwrap().enumerate(&adjacency).unwrap();
/// assert_eq!(cycles.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CycleCollector {
    config: EnumerationConfig,
}

impl CycleCollector {
    pub fn new(config: EnumerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(CycleCollector { config })
    }

    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Enumerates into a fresh collection.
    pub fn enumerate(&self, adjacency: &AdjacencyMatrix) -> Result<CycleCollection> {
        let mut collection = CycleCollection::new(self.config.max_cycles);
        self.enumerate_into(adjacency, &mut collection)?;
        Ok(collection)
    }

    /// Clears `collection`, then fills it. A short or empty result is not an error.
    pub fn enumerate_into(
        &self,
        adjacency: &AdjacencyMatrix,
        collection: &mut CycleCollection,
    ) -> Result<()> {
        collection.reset(self.config.max_cycles);
        if collection.is_full() || adjacency.is_empty() {
            debug!(
                "nothing to search: {} vertices, cap {}",
                adjacency.len(),
                self.config.max_cycles
            );
            return Ok(());
        }

        match self.config.strategy {
            Strategy::Sequential => collect_sequential(adjacency, collection),
            Strategy::Pool { threads } => {
                collect_pooled(adjacency, collection, threads, self.config.cancel_when_full)?
            }
        }

        info!(
            "found {} of at most {} cycle(s) over {} vertices ({:?})",
            collection.len(),
            self.config.max_cycles,
            adjacency.len(),
            self.config.strategy
        );
        Ok(())
    }
}

/// Sequential enumeration with a cap of `max_cycles`.
///
/// Start vertices are tried in increasing order and the result keeps that
/// order. At most one cycle is collected per start vertex.
pub fn enumerate(adjacency: &AdjacencyMatrix, max_cycles: usize) -> CycleCollection {
    let mut collection = CycleCollection::new(max_cycles);
    if !collection.is_full() {
        collect_sequential(adjacency, &mut collection);
    }
    info!(
        "found {} of at most {} cycle(s) over {} vertices",
        collection.len(),
        max_cycles,
        adjacency.len()
    );
    collection
}

fn collect_sequential(adjacency: &AdjacencyMatrix, collection: &mut CycleCollection) {
    let mut state = SearchState::new(adjacency.len());
    for start in 0..adjacency.len() {
        match state.find(adjacency, start) {
            Some(cycle) => {
                debug!("start vertex {}: cycle found", start);
                collection.push(cycle);
                if collection.is_full() {
                    break;
                }
            }
            None => debug!("start vertex {}: no cycle", start),
        }
    }
}

/// One task per start vertex on a dedicated pool. Appends land in completion
/// order. Without `cancel_when_full` every task runs to completion.
fn collect_pooled(
    adjacency: &AdjacencyMatrix,
    collection: &mut CycleCollection,
    threads: Option<usize>,
    cancel_when_full: bool,
) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .thread_name(|i| format!("knotwork-search-{i}"))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let n = adjacency.len();
    let cancel = cancel_when_full.then(|| AtomicBool::new(false));
    let shared = Mutex::new(collection);

    pool.install(|| {
        (0..n).into_par_iter().for_each_init(
            || SearchState::new(n),
            |state, start: Vertex| {
                let cycle = match attempt(state, adjacency, start, cancel.as_ref()) {
                    Attempt::Found(cycle) => cycle,
                    Attempt::Exhausted => {
                        debug!("start vertex {}: no cycle", start);
                        return;
                    }
                    Attempt::Cancelled => {
                        debug!("start vertex {}: cancelled, collection full", start);
                        return;
                    }
                };
                let mut guard = lock(&shared);
                if guard.push(cycle) {
                    debug!("start vertex {}: cycle found", start);
                } else {
                    debug!("start vertex {}: cycle found, collection already full", start);
                }
                if guard.is_full() {
                    if let Some(flag) = &cancel {
                        flag.store(true, Ordering::Relaxed);
                    }
                }
            },
        );
    });
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Attempt {
    Found(Cycle),
    Exhausted,
    Cancelled,
}

/// One search from `start`. A miss counts as cancelled when the flag was
/// raised, since the search may have stopped before exhausting its branches.
fn attempt(
    state: &mut SearchState,
    adjacency: &AdjacencyMatrix,
    start: Vertex,
    cancel: Option<&AtomicBool>,
) -> Attempt {
    let found = match cancel {
        Some(flag) => state.find_until(adjacency, start, flag),
        None => state.find(adjacency, start),
    };
    match found {
        Some(cycle) => Attempt::Found(cycle),
        None if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) => Attempt::Cancelled,
        None => Attempt::Exhausted,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
