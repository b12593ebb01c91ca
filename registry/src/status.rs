use serde::Serialize;

/// Point-in-time summary of the registry, suitable for health endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStatus {
    pub user_count: usize,
    pub friendship_count: usize,
    /// Approximate bytes held by the adjacency lists.
    pub memory_bytes: usize,
    /// Graph mutation counter; changes whenever a friendship query could.
    pub generation: u64,
    pub max_users: usize,
}
