use std::collections::HashMap;

use tracing::debug;

use crate::error::GraphError;

/// Identifier of a registered user. The graph stores only identifiers;
/// profile data lives with whoever registered the user.
pub type UserId = u64;

/// Undirected friendship graph: one adjacency list per registered user.
///
/// Every edge is stored twice, once in each endpoint's list, and both
/// mutations keep the two copies in step. Adjacency lists preserve
/// edge-insertion order so traversals are reproducible.
///
/// A key present with an empty list is an isolated user; a missing key
/// is an unknown user.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: HashMap<UserId, Vec<UserId>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known number of users.
    pub fn with_capacity(user_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(user_count),
            edge_count: 0,
        }
    }

    /// Build a graph from a vertex list and an edge list.
    ///
    /// Vertices are added first, then edges. Edges naming an unknown
    /// vertex are skipped, same as `add_edge`. A self-loop aborts the build.
    pub fn from_parts<V, E>(vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = UserId>,
        E: IntoIterator<Item = (UserId, UserId)>,
    {
        let mut graph = Graph::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        for (a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Register a user with no friendships.
    ///
    /// Returns false if the user was already present. An existing user
    /// keeps its adjacency list untouched.
    pub fn add_vertex(&mut self, v: UserId) -> bool {
        if self.adjacency.contains_key(&v) {
            debug!(user = v, "vertex already present, keeping its edges");
            return false;
        }
        self.adjacency.insert(v, Vec::new());
        true
    }

    pub fn has_vertex(&self, v: UserId) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Insert the undirected edge `a -- b`.
    ///
    /// Returns `Ok(true)` when a new edge was stored, `Ok(false)` when it
    /// already existed or either endpoint is unknown.
    pub fn add_edge(&mut self, a: UserId, b: UserId) -> Result<bool, GraphError> {
        if a == b {
            return Err(GraphError::self_friendship(a));
        }
        if !self.has_vertex(a) || !self.has_vertex(b) {
            return Ok(false);
        }
        if self.has_edge(a, b) {
            return Ok(false);
        }

        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        self.edge_count += 1;
        Ok(true)
    }

    /// Remove the undirected edge `a -- b` from both endpoints.
    ///
    /// Returns false if there was nothing to remove.
    pub fn delete_edge(&mut self, a: UserId, b: UserId) -> bool {
        if !self.has_edge(a, b) {
            return false;
        }

        if let Some(list) = self.adjacency.get_mut(&a) {
            list.retain(|&n| n != b);
        }
        if let Some(list) = self.adjacency.get_mut(&b) {
            list.retain(|&n| n != a);
        }
        self.edge_count -= 1;
        true
    }

    /// Direct friends of `v`, in the order the friendships were made.
    pub fn neighbors(&self, v: UserId) -> Result<&[UserId], GraphError> {
        self.adjacency
            .get(&v)
            .map(|list| list.as_slice())
            .ok_or(GraphError::NotFound { vertex: v })
    }

    /// Neighbor slice for traversal. Unknown vertices have no neighbors.
    pub(crate) fn neighbors_or_empty(&self, v: UserId) -> &[UserId] {
        self.adjacency.get(&v).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn has_edge(&self, a: UserId, b: UserId) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|list| list.contains(&b))
    }

    pub fn degree(&self, v: UserId) -> Option<usize> {
        self.adjacency.get(&v).map(|list| list.len())
    }

    pub fn vertices(&self) -> impl Iterator<Item = UserId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges. Each friendship counts once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let keys = self.adjacency.capacity() * (size_of::<UserId>() + size_of::<Vec<UserId>>());
        let lists: usize = self
            .adjacency
            .values()
            .map(|l| l.capacity() * size_of::<UserId>())
            .sum();

        keys + lists
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(ids: &[UserId]) -> Graph {
        let mut g = Graph::new();
        for &id in ids {
            g.add_vertex(id);
        }
        g
    }

    fn assert_symmetric(g: &Graph) {
        for v in g.vertices() {
            for &n in g.neighbors(v).unwrap() {
                assert!(
                    g.neighbors(n).unwrap().contains(&v),
                    "{} lists {} but not the reverse",
                    v,
                    n
                );
            }
        }
    }

    #[test]
    fn test_add_vertex_starts_isolated() {
        let g = users(&[1]);
        assert!(g.has_vertex(1));
        assert_eq!(g.neighbors(1).unwrap(), &[] as &[UserId]);
        assert_eq!(g.degree(1), Some(0));
    }

    #[test]
    fn test_unknown_vertex_is_not_found() {
        let g = users(&[1]);
        assert!(!g.has_vertex(2));
        assert_eq!(g.neighbors(2), Err(GraphError::NotFound { vertex: 2 }));
        assert_eq!(g.degree(2), None);
    }

    #[test]
    fn test_re_adding_vertex_keeps_edges() {
        let mut g = users(&[1, 2]);
        g.add_edge(1, 2).unwrap();
        assert!(!g.add_vertex(1));
        assert_eq!(g.neighbors(1).unwrap(), &[2]);
        assert_eq!(g.neighbors(2).unwrap(), &[1]);
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut g = users(&[1, 2]);
        assert_eq!(g.add_edge(1, 2), Ok(true));
        assert!(g.has_edge(1, 2));
        assert!(g.has_edge(2, 1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_twice_is_idempotent() {
        let mut g = users(&[1, 2]);
        g.add_edge(1, 2).unwrap();
        assert_eq!(g.add_edge(2, 1), Ok(false));
        assert_eq!(g.neighbors(1).unwrap(), &[2]);
        assert_eq!(g.neighbors(2).unwrap(), &[1]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut g = users(&[1]);
        assert!(matches!(g.add_edge(1, 1), Err(GraphError::InvalidArgument(_))));
        assert!(!g.has_edge(1, 1));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_unknown_vertex_is_noop() {
        let mut g = users(&[1]);
        assert_eq!(g.add_edge(1, 99), Ok(false));
        assert_eq!(g.add_edge(99, 1), Ok(false));
        assert!(g.neighbors(1).unwrap().is_empty());
        assert!(!g.has_vertex(99));
    }

    #[test]
    fn test_delete_edge_round_trip() {
        let mut g = users(&[1, 2, 3]);
        g.add_edge(1, 3).unwrap();
        let before = g.clone();

        g.add_edge(1, 2).unwrap();
        assert!(g.delete_edge(2, 1));

        for v in [1, 2, 3] {
            assert_eq!(g.neighbors(v).unwrap(), before.neighbors(v).unwrap());
        }
        assert_eq!(g.edge_count(), before.edge_count());
    }

    #[test]
    fn test_delete_missing_edge_is_noop() {
        let mut g = users(&[1, 2]);
        assert!(!g.delete_edge(1, 2));
        assert!(!g.delete_edge(1, 99));
        assert!(!g.delete_edge(1, 1));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_neighbor_order_is_insertion_order() {
        let mut g = users(&[1, 2, 3, 4]);
        g.add_edge(1, 4).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(3, 1).unwrap();
        assert_eq!(g.neighbors(1).unwrap(), &[4, 2, 3]);

        g.delete_edge(1, 2);
        assert_eq!(g.neighbors(1).unwrap(), &[4, 3]);
    }

    #[test]
    fn test_symmetry_after_mixed_operations() {
        let mut g = users(&[1, 2, 3, 4, 5]);
        let ops: [(bool, UserId, UserId); 8] = [
            (true, 1, 2),
            (true, 2, 3),
            (true, 3, 1),
            (true, 4, 5),
            (false, 2, 1),
            (true, 5, 1),
            (false, 4, 3),
            (false, 5, 4),
        ];
        for (add, a, b) in ops {
            if add {
                g.add_edge(a, b).unwrap();
            } else {
                g.delete_edge(a, b);
            }
            assert_symmetric(&g);
        }
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_from_parts() {
        let g = Graph::from_parts([1, 2, 3], [(1, 2), (2, 3), (3, 42)]).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(!g.has_vertex(42));
    }

    #[test]
    fn test_from_parts_rejects_self_loop() {
        let result = Graph::from_parts([1, 2], [(1, 2), (2, 2)]);
        assert!(matches!(result, Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = Graph::from_parts(0..100, (1..100).map(|i| (0, i))).unwrap();
        assert!(g.memory_usage() > 0);
    }
}
