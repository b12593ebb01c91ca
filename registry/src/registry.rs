use std::collections::HashMap;

use friend_graph_core::{SharedGraph, UserId};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::status::RegistryStatus;
use crate::user::{NewUser, User};

struct Users {
    by_id: HashMap<UserId, User>,
    /// None once an id of `UserId::MAX` has been taken.
    next_id: Option<UserId>,
}

/// Registered users plus the friendship graph between them.
///
/// Constructed once by the application and shared behind an `Arc`.
/// Every operation takes user ids, checks them against the registry and
/// then defers to the graph. Lock order is always users, then graph.
pub struct UserRegistry {
    config: RegistryConfig,
    users: RwLock<Users>,
    graph: SharedGraph,
}

impl UserRegistry {
    /// Build an empty registry, rejecting out-of-bounds settings.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: RegistryConfig) -> Self {
        Self {
            config,
            users: RwLock::new(Users {
                by_id: HashMap::new(),
                next_id: Some(1),
            }),
            graph: SharedGraph::new(),
        }
    }

    /// The underlying graph handle, for read-only inspection.
    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    /// Register a new user under the next free id.
    pub fn register(&self, request: NewUser) -> Result<User> {
        let mut users = self.users.write();
        let id = users.next_id.ok_or(RegistryError::IdsExhausted)?;
        let user = request.into_user(id);
        self.insert_locked(&mut users, user.clone())?;
        Ok(user)
    }

    /// Register a user under a caller-chosen id.
    ///
    /// Fails with `UserExists` if the id is taken, so an existing user's
    /// friendships are never reset by a second registration.
    pub fn add_user(&self, user: User) -> Result<()> {
        let mut users = self.users.write();
        self.insert_locked(&mut users, user)
    }

    fn insert_locked(&self, users: &mut Users, user: User) -> Result<()> {
        if user.name.trim().is_empty() {
            return Err(RegistryError::invalid("user name must not be empty"));
        }
        if users.by_id.contains_key(&user.id) {
            warn!(user = user.id, "duplicate registration rejected");
            return Err(RegistryError::UserExists(user.id));
        }
        if users.by_id.len() >= self.config.max_users {
            return Err(RegistryError::CapacityExceeded {
                max_users: self.config.max_users,
            });
        }

        self.graph.add_vertex(user.id);
        users.next_id = match (users.next_id, user.id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
        debug!(user = user.id, name = %user.name, "user registered");
        users.by_id.insert(user.id, user);
        Ok(())
    }

    pub fn find_by_id(&self, id: UserId) -> Result<User> {
        self.users
            .read()
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(id))
    }

    /// Every registered user, ordered by id.
    pub fn all_users(&self) -> Vec<User> {
        let mut all: Vec<User> = self.users.read().by_id.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        all
    }

    pub fn user_count(&self) -> usize {
        self.users.read().by_id.len()
    }

    /// Make `a` and `b` friends. Returns false if they already were.
    pub fn add_friendship(&self, a: UserId, b: UserId) -> Result<bool> {
        self.check_pair(a, b)?;
        Ok(self.graph.add_edge(a, b)?)
    }

    /// End the friendship between `a` and `b`. Returns false if there was none.
    pub fn delete_friendship(&self, a: UserId, b: UserId) -> Result<bool> {
        self.check_pair(a, b)?;
        Ok(self.graph.delete_edge(a, b))
    }

    /// Direct friends of `id`, in the order the friendships were made.
    pub fn friends(&self, id: UserId) -> Result<Vec<User>> {
        self.check_known(id)?;
        let ids = self.graph.neighbors(id)?;
        Ok(self.resolve(&ids))
    }

    /// Users reachable through friends who are not friends of `id` yet.
    ///
    /// Reach is bounded by `potential_friend_depth` when configured.
    pub fn potential_friends(&self, id: UserId) -> Result<Vec<User>> {
        self.check_known(id)?;
        let ids = self
            .graph
            .potential_friends(id, self.config.potential_friend_depth);
        Ok(self.resolve(&ids))
    }

    /// Shortest chain of friends from `from` to `to`, both inclusive.
    pub fn path(&self, from: UserId, to: UserId) -> Result<Vec<User>> {
        self.check_known(from)?;
        self.check_known(to)?;
        let ids = self
            .graph
            .path_between(from, to, self.config.max_path_hops)?;
        Ok(self.resolve(&ids))
    }

    pub fn status(&self) -> RegistryStatus {
        let users = self.users.read();
        let ((friendship_count, memory_bytes), generation) = self
            .graph
            .read_versioned(|g| (g.edge_count(), g.memory_usage()));

        RegistryStatus {
            user_count: users.by_id.len(),
            friendship_count,
            memory_bytes,
            generation,
            max_users: self.config.max_users,
        }
    }

    fn check_known(&self, id: UserId) -> Result<()> {
        if self.users.read().by_id.contains_key(&id) {
            Ok(())
        } else {
            Err(RegistryError::not_found(id))
        }
    }

    fn check_pair(&self, a: UserId, b: UserId) -> Result<()> {
        self.check_known(a)?;
        self.check_known(b)?;
        if a == b {
            warn!(user = a, "self-friendship rejected");
            return Err(RegistryError::invalid(format!(
                "user {a} cannot befriend themselves"
            )));
        }
        Ok(())
    }

    fn resolve(&self, ids: &[UserId]) -> Vec<User> {
        let users = self.users.read();
        ids.iter()
            .filter_map(|id| users.by_id.get(id).cloned())
            .collect()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::with_valid_config(RegistryConfig::default())
    }
}
