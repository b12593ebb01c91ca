//! friend-graph CLI - query a seeded friendship graph from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use friend_graph_registry::{
    load_seed_file, RegistryConfig, User, UserId, UserRegistry, UserSummary,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "friend-graph")]
#[command(about = "Friendship graph queries over a JSON seed", long_about = None)]
struct Cli {
    /// JSON seed with users and friendships
    #[arg(short, long)]
    seed: PathBuf,

    /// Optional TOML config
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a user's friends
    Friends {
        /// User id
        id: UserId,
    },

    /// List users reachable through friends but not yet friends
    Potential {
        /// User id
        id: UserId,
    },

    /// Shortest chain of friends between two users
    Path {
        /// Starting user id
        from: UserId,

        /// Target user id
        to: UserId,
    },

    /// Show registry counters
    Status,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Execute one command and render its result as pretty JSON.
fn run(cli: Cli) -> friend_graph_registry::Result<String> {
    let config = match &cli.config {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::default(),
    };

    let registry = UserRegistry::new(config)?;
    load_seed_file(&registry, &cli.seed)?;

    let output = match cli.command {
        Commands::Friends { id } => summaries(registry.friends(id)?)?,
        Commands::Potential { id } => summaries(registry.potential_friends(id)?)?,
        Commands::Path { from, to } => summaries(registry.path(from, to)?)?,
        Commands::Status => serde_json::to_value(registry.status())?,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

fn summaries(users: Vec<User>) -> friend_graph_registry::Result<serde_json::Value> {
    let list: Vec<UserSummary> = users.into_iter().map(UserSummary::from).collect();
    Ok(serde_json::to_value(list)?)
}
