use std::collections::{HashMap, VecDeque};

use crate::error::GraphError;
use crate::graph::{Graph, UserId};

/// Breadth-first search tree rooted at one user.
///
/// Each reached user maps to `(distance, predecessor)`. The root is its
/// own predecessor at distance 0. `order` lists users in discovery order,
/// root first.
#[derive(Debug, Clone)]
pub struct BfsTree {
    start: UserId,
    visited: HashMap<UserId, (u32, UserId)>,
    order: Vec<UserId>,
}

impl BfsTree {
    fn empty(start: UserId) -> Self {
        Self {
            start,
            visited: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Hop count from the root, or None if `v` was not reached.
    pub fn distance(&self, v: UserId) -> Option<u32> {
        self.visited.get(&v).map(|&(d, _)| d)
    }

    pub fn contains(&self, v: UserId) -> bool {
        self.visited.contains_key(&v)
    }

    /// Reached users other than the root, in discovery order.
    pub fn reached(&self) -> impl Iterator<Item = UserId> + '_ {
        self.order.iter().copied().skip(1)
    }

    /// Number of users visited, root included. Zero when the root is unknown.
    pub fn nodes_visited(&self) -> usize {
        self.order.len()
    }

    /// Walk predecessor links from `target` back to the root.
    ///
    /// Returns the path root → target inclusive, or None if `target` was
    /// never reached.
    pub fn path_to(&self, target: UserId) -> Option<Vec<UserId>> {
        if !self.visited.contains_key(&target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.start {
            let &(_, parent) = self.visited.get(&current)?;
            path.push(parent);
            current = parent;
        }

        path.reverse();
        Some(path)
    }
}

/// BFS from `start`, expanding at most `max_depth` hops (unbounded if None).
///
/// Each user is visited once, at its minimum distance; the first
/// predecessor to discover it is kept. Neighbors are expanded in
/// adjacency-list order, which makes tie-breaking deterministic.
pub fn bfs(graph: &Graph, start: UserId, max_depth: Option<u32>) -> BfsTree {
    search(graph, start, max_depth, None)
}

/// BFS that stops as soon as `target` is discovered, if one is given.
fn search(
    graph: &Graph,
    start: UserId,
    max_depth: Option<u32>,
    target: Option<UserId>,
) -> BfsTree {
    if !graph.has_vertex(start) {
        return BfsTree::empty(start);
    }

    let mut tree = BfsTree::empty(start);
    let mut queue: VecDeque<(UserId, u32)> = VecDeque::new();

    tree.visited.insert(start, (0, start));
    tree.order.push(start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if max_depth.is_some_and(|max| depth >= max) {
            continue;
        }

        for &next in graph.neighbors_or_empty(current) {
            if !tree.visited.contains_key(&next) {
                tree.visited.insert(next, (depth + 1, current));
                tree.order.push(next);
                if target == Some(next) {
                    return tree;
                }
                queue.push_back((next, depth + 1));
            }
        }
    }

    tree
}

/// Users reachable from `source` who are neither `source` nor a direct friend.
///
/// With `max_depth` of None every user in the source's connected
/// component at distance two or more is returned. `Some(2)` restricts
/// the result to friends of friends. Results come in BFS discovery order
/// with no duplicates. An unknown source yields an empty list.
pub fn potential_friends(graph: &Graph, source: UserId, max_depth: Option<u32>) -> Vec<UserId> {
    let tree = bfs(graph, source, max_depth);
    tree.reached()
        .filter(|&v| tree.distance(v).is_some_and(|d| d >= 2))
        .collect()
}

/// Shortest path by edge count from `source` to `target`, both inclusive.
pub fn path_between(
    graph: &Graph,
    source: UserId,
    target: UserId,
) -> Result<Vec<UserId>, GraphError> {
    shortest_path(graph, source, target, None)
}

/// Shortest path limited to `max_hops` edges.
///
/// Fails with `NotFound` if either endpoint is unknown and with
/// `NoPathExists` if `target` is unreachable within the hop budget.
/// When `source == target` the path is just `[source]`.
pub fn shortest_path(
    graph: &Graph,
    source: UserId,
    target: UserId,
    max_hops: Option<u32>,
) -> Result<Vec<UserId>, GraphError> {
    for v in [source, target] {
        if !graph.has_vertex(v) {
            return Err(GraphError::NotFound { vertex: v });
        }
    }

    if source == target {
        return Ok(vec![source]);
    }

    search(graph, source, max_hops, Some(target))
        .path_to(target)
        .ok_or(GraphError::NoPathExists {
            from: source,
            to: target,
        })
}
