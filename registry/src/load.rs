//! Bulk loading of users and friendships from a JSON seed document.
//!
//! ```json
//! {
//!   "users": [{"id": 1, "name": "ada"}, {"id": 2, "name": "grace"}],
//!   "friendships": [[1, 2]]
//! }
//! ```
//!
//! Users are registered first, then friendships. The first failing record
//! aborts the load; whatever was applied before it stays applied.

use std::path::Path;
use std::time::Instant;

use friend_graph_core::UserId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::registry::UserRegistry;
use crate::user::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub friendships: Vec<(UserId, UserId)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSummary {
    pub users: usize,
    /// Friendships newly created; repeats in the seed are not counted.
    pub friendships: usize,
    pub load_time_ms: f64,
}

impl Seed {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Apply a seed to the registry.
pub fn load_seed(registry: &UserRegistry, seed: Seed) -> Result<LoadSummary> {
    let start = Instant::now();

    let users = seed.users.len();
    for user in seed.users {
        registry.add_user(user)?;
    }

    let mut friendships = 0;
    for (a, b) in seed.friendships {
        if registry.add_friendship(a, b)? {
            friendships += 1;
        }
    }

    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(users, friendships, load_time_ms, "seed loaded");

    Ok(LoadSummary {
        users,
        friendships,
        load_time_ms,
    })
}

/// Read a seed file and apply it.
pub fn load_seed_file(registry: &UserRegistry, path: &Path) -> Result<LoadSummary> {
    info!(path = %path.display(), "loading seed");
    load_seed(registry, Seed::from_file(path)?)
}
