//! friend-graph-core: In-memory friendship graph.
//!
//! Keeps an undirected adjacency list keyed by user id and answers three
//! relationship queries over it: direct friends, potential friends
//! (reachable but not yet connected) and the shortest chain of friends
//! between two users. No I/O and no user profile data; callers resolve
//! their own user records to ids.

mod error;
mod graph;
mod shared;
mod traversal;

pub use error::GraphError;
pub use graph::{Graph, UserId};
pub use shared::SharedGraph;
pub use traversal::{bfs, path_between, potential_friends, shortest_path, BfsTree};
