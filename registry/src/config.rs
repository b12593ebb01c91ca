use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

pub const MIN_MAX_USERS: usize = 1;
pub const MAX_MAX_USERS: usize = 100_000_000;

/// Registry settings, read from a TOML file.
///
/// ```toml
/// potential_friend_depth = 2   # omit for whole-component reach
/// max_path_hops = 6
/// max_users = 50000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// BFS depth for potential-friend queries. Unset means every user in
    /// the same connected component; 2 means strict friends of friends.
    #[serde(default)]
    pub potential_friend_depth: Option<u32>,

    /// Longest friend chain `path` will search for. Unset means unbounded.
    #[serde(default)]
    pub max_path_hops: Option<u32>,

    /// Registration cap.
    #[serde(default = "default_max_users")]
    pub max_users: usize,
}

fn default_max_users() -> usize {
    1_000_000
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            potential_friend_depth: None,
            max_path_hops: None,
            max_users: default_max_users(),
        }
    }
}

impl RegistryConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: RegistryConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(depth) = self.potential_friend_depth {
            if depth < 2 {
                return Err(RegistryError::Config(format!(
                    "potential_friend_depth must be at least 2, got {depth}"
                )));
            }
        }
        if self.max_path_hops == Some(0) {
            return Err(RegistryError::Config(
                "max_path_hops must be at least 1".to_string(),
            ));
        }
        if !(MIN_MAX_USERS..=MAX_MAX_USERS).contains(&self.max_users) {
            return Err(RegistryError::Config(format!(
                "max_users must be within {}..={}, got {}",
                MIN_MAX_USERS, MAX_MAX_USERS, self.max_users
            )));
        }
        Ok(())
    }
}
