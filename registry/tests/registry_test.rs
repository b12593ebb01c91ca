use std::io::Write;
use std::sync::Arc;

use friend_graph_registry::{
    load_seed_file, GraphError, NewUser, RegistryConfig, RegistryError, User, UserId,
    UserRegistry,
};
use rstest::rstest;

fn ids(users: &[User]) -> Vec<UserId> {
    users.iter().map(|u| u.id).collect()
}

fn registry_with_edges(n: UserId, edges: &[(UserId, UserId)]) -> UserRegistry {
    let registry = UserRegistry::default();
    for id in 1..=n {
        registry.add_user(User::new(id, format!("user{id}"))).unwrap();
    }
    for &(a, b) in edges {
        registry.add_friendship(a, b).unwrap();
    }
    registry
}

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn shortcut_wins_over_long_route() {
    // A–B–C–D plus A–D
    let registry = registry_with_edges(4, &[(1, 2), (2, 3), (3, 4), (1, 4)]);
    assert_eq!(ids(&registry.path(1, 4).unwrap()), vec![1, 4]);
}

#[test]
fn friends_of_friends_exclude_direct_friends() {
    let registry = registry_with_edges(3, &[(1, 2), (2, 3)]);
    let potential = ids(&registry.potential_friends(1).unwrap());
    assert!(potential.contains(&3));
    assert!(!potential.contains(&2));
    assert!(!potential.contains(&1));
}

#[test]
fn disconnected_users_have_no_path() {
    let registry = registry_with_edges(4, &[(1, 2), (3, 4)]);
    let err = registry.path(1, 3).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Graph(GraphError::NoPathExists { from: 1, to: 3 })
    ));
}

#[rstest]
#[case::add(true)]
#[case::delete(false)]
fn self_friendship_is_invalid(#[case] add: bool) {
    let registry = registry_with_edges(1, &[]);
    let result = if add {
        registry.add_friendship(1, 1)
    } else {
        registry.delete_friendship(1, 1)
    };
    assert!(matches!(
        result,
        Err(RegistryError::Graph(GraphError::InvalidArgument(_)))
    ));
    assert!(registry.friends(1).unwrap().is_empty());
}

#[test]
fn add_then_delete_restores_friend_lists() {
    let registry = registry_with_edges(3, &[(1, 3)]);
    let before: Vec<_> = (1..=3).map(|id| ids(&registry.friends(id).unwrap())).collect();

    registry.add_friendship(2, 1).unwrap();
    registry.delete_friendship(1, 2).unwrap();

    let after: Vec<_> = (1..=3).map(|id| ids(&registry.friends(id).unwrap())).collect();
    assert_eq!(before, after);
}

#[test]
fn unknown_user_is_not_found_everywhere() {
    let registry = registry_with_edges(2, &[(1, 2)]);
    assert!(registry.friends(9).unwrap_err().is_not_found());
    assert!(registry.potential_friends(9).unwrap_err().is_not_found());
    assert!(registry.path(1, 9).unwrap_err().is_not_found());
    assert!(registry.path(9, 1).unwrap_err().is_not_found());
    assert!(registry.add_friendship(1, 9).unwrap_err().is_not_found());
}

#[test]
fn generation_tracks_friendship_changes() {
    let registry = registry_with_edges(3, &[]);
    let g0 = registry.status().generation;

    registry.add_friendship(1, 2).unwrap();
    let g1 = registry.status().generation;
    assert!(g1 > g0);

    registry.add_friendship(1, 2).unwrap();
    registry.delete_friendship(2, 3).unwrap();
    assert_eq!(registry.status().generation, g1);
}

#[test]
fn seed_and_config_files() {
    let seed = write_temp(
        r#"{
            "users": [
                {"id": 1, "name": "ada"},
                {"id": 2, "name": "grace"},
                {"id": 3, "name": "alan"},
                {"id": 4, "name": "edsger"}
            ],
            "friendships": [[1, 2], [2, 3], [3, 4]]
        }"#,
        ".json",
    );
    let config = write_temp("potential_friend_depth = 2\n", ".toml");

    let registry = UserRegistry::new(RegistryConfig::load(config.path()).unwrap()).unwrap();
    let summary = load_seed_file(&registry, seed.path()).unwrap();
    assert_eq!(summary.users, 4);
    assert_eq!(summary.friendships, 3);

    let potential = registry.potential_friends(1).unwrap();
    assert_eq!(potential.len(), 1);
    assert_eq!(potential[0].name, "alan");

    let next = registry
        .register(NewUser {
            name: "barbara".into(),
        })
        .unwrap();
    assert_eq!(next.id, 5);
}

#[test]
fn missing_seed_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = UserRegistry::default();
    let err = load_seed_file(&registry, &dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RegistryError::Io(_)));
}

#[test]
fn concurrent_readers_and_writers() {
    let registry = Arc::new(registry_with_edges(32, &[]));

    std::thread::scope(|s| {
        for t in 0..4u64 {
            let registry = Arc::clone(&registry);
            s.spawn(move || {
                for i in 1..=32u64 {
                    let j = (i + t) % 32 + 1;
                    if i != j {
                        registry.add_friendship(i, j).unwrap();
                    }
                    let _ = registry.potential_friends(i).unwrap();
                    let _ = registry.path(1, i);
                }
            });
        }
    });

    for user in registry.all_users() {
        for friend in registry.friends(user.id).unwrap() {
            let back = ids(&registry.friends(friend.id).unwrap());
            assert!(back.contains(&user.id));
        }
    }
}

#[test]
fn status_snapshot_is_consistent_under_writes() {
    let registry = Arc::new(registry_with_edges(16, &[]));

    std::thread::scope(|s| {
        let writer = Arc::clone(&registry);
        s.spawn(move || {
            for i in 2..=16u64 {
                writer.add_friendship(1, i).unwrap();
            }
        });

        for _ in 0..64 {
            let status = registry.status();
            assert_eq!(
                status.generation,
                (status.user_count + status.friendship_count) as u64
            );
        }
    });
}
