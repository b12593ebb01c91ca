//! Lock-guarded handle to a single graph shared across request handlers.
//!
//! Mutations take the write lock; queries take the read lock and hand back
//! owned results, so no caller ever holds a reference into the graph after
//! the lock is released.
//!
//! A generation counter is bumped on every mutation that changes the
//! adjacency. Callers that cache query results compare generations to
//! detect staleness.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::GraphError;
use crate::graph::{Graph, UserId};
use crate::traversal;

struct SharedState {
    graph: Graph,
    generation: u64,
}

/// Cloneable handle; clones share the same underlying graph.
#[derive(Clone)]
pub struct SharedGraph {
    inner: Arc<RwLock<SharedState>>,
}

impl SharedGraph {
    pub fn new() -> Self {
        Self::from_graph(Graph::new())
    }

    /// Wrap an already-built graph. Generation starts at 0.
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SharedState {
                graph,
                generation: 0,
            })),
        }
    }

    pub fn add_vertex(&self, v: UserId) -> bool {
        let mut state = self.inner.write();
        let added = state.graph.add_vertex(v);
        if added {
            state.generation += 1;
            debug!(user = v, generation = state.generation, "vertex added");
        }
        added
    }

    pub fn add_edge(&self, a: UserId, b: UserId) -> Result<bool, GraphError> {
        let mut state = self.inner.write();
        let added = state.graph.add_edge(a, b)?;
        if added {
            state.generation += 1;
            debug!(a, b, generation = state.generation, "edge added");
        }
        Ok(added)
    }

    pub fn delete_edge(&self, a: UserId, b: UserId) -> bool {
        let mut state = self.inner.write();
        let removed = state.graph.delete_edge(a, b);
        if removed {
            state.generation += 1;
            debug!(a, b, generation = state.generation, "edge deleted");
        }
        removed
    }

    pub fn has_vertex(&self, v: UserId) -> bool {
        self.inner.read().graph.has_vertex(v)
    }

    /// Snapshot of `v`'s direct friends.
    pub fn neighbors(&self, v: UserId) -> Result<Vec<UserId>, GraphError> {
        self.inner.read().graph.neighbors(v).map(|n| n.to_vec())
    }

    pub fn potential_friends(&self, source: UserId, max_depth: Option<u32>) -> Vec<UserId> {
        traversal::potential_friends(&self.inner.read().graph, source, max_depth)
    }

    pub fn path_between(
        &self,
        source: UserId,
        target: UserId,
        max_hops: Option<u32>,
    ) -> Result<Vec<UserId>, GraphError> {
        traversal::shortest_path(&self.inner.read().graph, source, target, max_hops)
    }

    /// Run a read-only closure under one read-lock acquisition.
    pub fn read<R, F: FnOnce(&Graph) -> R>(&self, f: F) -> R {
        f(&self.inner.read().graph)
    }

    /// Like `read`, also returning the generation seen under the same lock.
    pub fn read_versioned<R, F: FnOnce(&Graph) -> R>(&self, f: F) -> (R, u64) {
        let state = self.inner.read();
        (f(&state.graph), state.generation)
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }
}

impl Default for SharedGraph {
    fn default() -> Self {
        Self::new()
    }
}
