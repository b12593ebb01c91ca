use std::time::Instant;

use clap::{Parser, ValueEnum};
use friend_graph_core::{Graph, UserId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "friend-graph-bench")]
#[command(about = "Time friendship queries on synthetic social graphs", long_about = None)]
struct Args {
    /// Graph shape to generate
    #[arg(value_enum, default_value = "all")]
    mode: Mode,

    /// Number of users
    #[arg(default_value_t = 1_000_000, value_parser = clap::value_parser!(u64).range(1..))]
    users: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every generator (default)
    All,
    /// Invitation tree: each user invited three others
    Tree,
    /// Preferential attachment via edge sampling (influencers)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random friendships
    Random,
    /// Two communities joined by a thin chain of acquaintances
    Barbell,
}

type Generator = fn(u64) -> Graph;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Tree => vec![("Invitation tree", gen_tree)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (community-bridge-community)", gen_barbell)],
        Mode::All => vec![
            ("Invitation tree", gen_tree as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (community-bridge-community)", gen_barbell),
        ],
    };

    println!("friend-graph-bench");
    println!("==================");
    println!();

    for (name, generator) in generators {
        run_benchmark(name, generator, args.users);
    }
}

fn run_benchmark(name: &str, generator: Generator, users: u64) {
    println!("--- {} ---", name);
    println!("Target: {} users", users);

    let t = Instant::now();
    let graph = generator(users);
    let gen_time = t.elapsed();
    info!(
        generator = name,
        users = graph.vertex_count(),
        friendships = graph.edge_count(),
        "graph generated"
    );
    println!(
        "Generated in {:.2}s: {} users, {} friendships, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    println!();
    println!("{:>10} {:>12} {:>12} {:>10}", "depth", "potential", "visited", "time");
    println!("{:->10} {:->12} {:->12} {:->10}", "", "", "", "");

    for depth in [Some(2), Some(3), Some(5), None] {
        let t = Instant::now();
        let potential = friend_graph_core::potential_friends(&graph, 0, depth);
        let elapsed = t.elapsed();
        let visited = friend_graph_core::bfs(&graph, 0, depth).nodes_visited();
        let label = depth.map_or("all".to_string(), |d| d.to_string());
        println!(
            "{:>10} {:>12} {:>12} {:>8.1}ms",
            label,
            potential.len(),
            visited,
            elapsed.as_secs_f64() * 1000.0
        );
        if visited >= graph.vertex_count() {
            println!("{:>10} (entire graph reached)", "");
            break;
        }
    }

    // First user to last user
    let far_user = graph.vertex_count() as UserId - 1;
    println!();
    let t = Instant::now();
    let path = friend_graph_core::path_between(&graph, 0, far_user);
    let elapsed = t.elapsed();
    match path {
        Ok(p) => println!(
            "Path 0 → {}: {} hops in {:.1}ms",
            far_user,
            p.len() - 1,
            elapsed.as_secs_f64() * 1000.0
        ),
        Err(e) => println!("Path 0 → {}: {} ({:.1}ms)", far_user, e, elapsed.as_secs_f64() * 1000.0),
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(users + friendships), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn with_users(users: u64) -> Graph {
    let mut graph = Graph::with_capacity(users as usize);
    for id in 0..users {
        graph.add_vertex(id);
    }
    graph
}

/// Generators never ask for self-friendships, and repeats are absorbed.
fn befriend(graph: &mut Graph, a: UserId, b: UserId) {
    if a != b {
        let added = graph.add_edge(a, b);
        debug_assert!(added.is_ok(), "self-friendship reached the graph");
    }
}

/// Each user invited up to three new users. Deep, narrow paths.
fn gen_tree(users: u64) -> Graph {
    let mut graph = with_users(users);
    let branching = 3u64;

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < users && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= users {
                    break;
                }
                befriend(&mut graph, parent, next_id);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Preferential attachment by picking a random endpoint of an existing
/// friendship. Well-connected users are more likely to be picked.
fn gen_scale_free(users: u64) -> Graph {
    let per_user = 10u64;
    let mut graph = with_users(users);
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<u64> = Vec::with_capacity((users * per_user * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(users);
    for i in 0..seed {
        for j in (i + 1)..seed {
            befriend(&mut graph, i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_user in seed..users {
        if endpoints.is_empty() {
            break;
        }
        for _ in 0..per_user.min(new_user) {
            let idx = rng.next(endpoints.len() as u64) as usize;
            let target = endpoints[idx];
            if target != new_user {
                befriend(&mut graph, new_user, target);
                endpoints.push(new_user);
                endpoints.push(target);
            }
        }
    }

    graph
}

/// Ring lattice of K nearest neighbors with each friendship rewired to a
/// random user with probability p. High clustering, short paths.
fn gen_small_world(users: u64) -> Graph {
    let k = 10u64;
    let p = 0.05f64;
    let mut graph = with_users(users);
    let mut rng = FastRng::new(67890);

    for i in 0..users {
        for j in 1..=k {
            let neighbor = (i + j) % users;
            if rng.next_f64() < p {
                befriend(&mut graph, i, rng.next(users));
            } else {
                befriend(&mut graph, i, neighbor);
            }
        }
    }

    graph
}

/// Uniform random friendships, ~10 per user. No structure.
fn gen_random(users: u64) -> Graph {
    let mut graph = with_users(users);
    let mut rng = FastRng::new(54321);

    for _ in 0..users * 10 {
        let a = rng.next(users);
        let b = rng.next(users);
        befriend(&mut graph, a, b);
    }

    graph
}

/// Two dense communities joined by a chain of ~10 acquaintances.
/// Every path across has to squeeze through the bridge.
fn gen_barbell(users: u64) -> Graph {
    let bridge_len = 10u64.min(users);
    let community = (users - bridge_len) / 2;
    let mut graph = with_users(users);
    let mut rng = FastRng::new(99999);

    let mut densify = |graph: &mut Graph, offset: u64| {
        for i in 0..community {
            for _ in 0..20u64.min(community.saturating_sub(1)) {
                let other = rng.next(community);
                befriend(graph, offset + i, offset + other);
            }
        }
    };

    densify(&mut graph, 0);

    // Bridge chain from the last user of the first community
    let bridge_start = community;
    let mut prev = community.saturating_sub(1);
    for id in bridge_start..bridge_start + bridge_len {
        befriend(&mut graph, prev, id);
        prev = id;
    }

    let b_start = bridge_start + bridge_len;
    befriend(&mut graph, prev, b_start);
    densify(&mut graph, b_start);

    // Odd leftover user joins the second community
    for extra in b_start + community..users {
        befriend(&mut graph, extra, b_start);
    }

    graph
}
