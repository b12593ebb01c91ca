use friend_graph_core::UserId;
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Registration request: everything but the id, which the registry assigns.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User { id, name: self.name }
    }
}

/// Outbound view of a user, as returned from friendship queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub user_id: UserId,
    pub user_name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            user_name: user.name,
        }
    }
}
