//! friend-graph-registry: user registry on top of friend-graph-core.
//!
//! Owns user records and id allocation, validates ids before they reach
//! the graph, and turns id results back into users. Also provides config
//! loading, JSON seeding and a status report.

pub mod config;
pub mod error;
pub mod load;
pub mod registry;
pub mod status;
pub mod user;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use load::{load_seed, load_seed_file, LoadSummary, Seed};
pub use registry::UserRegistry;
pub use status::RegistryStatus;
pub use user::{NewUser, User, UserSummary};

pub use friend_graph_core::{GraphError, UserId};
