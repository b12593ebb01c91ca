use friend_graph_core::{GraphError, UserId};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("user {0} is already registered")]
    UserExists(UserId),

    #[error("registry is full ({max_users} users)")]
    CapacityExceeded { max_users: usize },

    #[error("no user ids left to assign")]
    IdsExhausted,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RegistryError {
    pub fn not_found(id: UserId) -> Self {
        RegistryError::Graph(GraphError::NotFound { vertex: id })
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        RegistryError::Graph(GraphError::InvalidArgument(msg.into()))
    }

    /// True for unknown-user failures, whichever layer raised them.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::Graph(GraphError::NotFound { .. }))
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
