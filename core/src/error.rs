use crate::graph::UserId;

/// Failures reported by graph mutations and traversals.
///
/// All variants are recoverable and describe the request, not the state
/// of the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("user {vertex} is not in the graph")]
    NotFound { vertex: UserId },

    #[error("no path from user {from} to user {to}")]
    NoPathExists { from: UserId, to: UserId },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GraphError {
    pub(crate) fn self_friendship(vertex: UserId) -> Self {
        GraphError::InvalidArgument(format!("user {vertex} cannot befriend themselves"))
    }
}
