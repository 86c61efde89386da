use std::sync::Arc;
use std::thread;

use rand::seq::SliceRandom;
use rand::thread_rng;
use radix_params::{Settings, SyncTree, Tree};

fn routes() -> Vec<String> {
    let mut routes = Vec::new();
    for section in &["users", "posts", "tags", "u"] {
        routes.push(format!("/{}", section));
        routes.push(format!("/{}/@id", section));
        routes.push(format!("/{}/@id/edit", section));
        routes.push(format!("/{}/new", section));
        routes.push(format!("/{}/newest", section));
    }
    routes.push("/static/*path".to_string());
    routes
}

#[test]
fn test_concurrent_adds_match_serial_build() {
    let _ = env_logger::builder().is_test(true).try_init();

    let routes = routes();
    let mut serial = Tree::new();
    for route in &routes {
        serial.add(route, route.clone()).unwrap();
    }

    for _ in 0..10 {
        let shared = Arc::new(SyncTree::new());
        let mut shuffled = routes.clone();
        shuffled.shuffle(&mut thread_rng());

        let handles: Vec<_> = shuffled
            .chunks(4)
            .map(|chunk| {
                let shared = Arc::clone(&shared);
                let chunk = chunk.to_vec();
                thread::spawn(move || {
                    for route in chunk {
                        shared.add(&route, route.clone()).unwrap();
                        // Lookups interleave with writers.
                        let _ = shared.get("/users/42/edit");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), serial.len());
        assert_eq!(shared.size(), serial.size());
        for probe in &["/users/42", "/posts/new", "/tags/9/edit", "/static/a/b", "/u"] {
            let (value, params) = shared.get(probe);
            let (node, expected) = serial.get(probe);
            assert_eq!(value.as_ref(), node.and_then(|n| n.value()));
            assert_eq!(params, expected);
        }
    }
}

#[test]
fn test_concurrent_deletes() {
    let routes = routes();
    let shared = Arc::new(SyncTree::from(Tree::new()));
    for route in &routes {
        shared.add(route, ()).unwrap();
    }

    let handles: Vec<_> = routes
        .chunks(3)
        .map(|chunk| {
            let shared = Arc::clone(&shared);
            let chunk = chunk.to_vec();
            thread::spawn(move || {
                for route in chunk {
                    shared.del(&route);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(shared.is_empty());
    assert_eq!(shared.len(), 1);
}

#[test]
fn test_render_under_lock() {
    let shared = SyncTree::with_settings(Settings::default().no_color(true)).unwrap();
    shared.add("/a", 1).unwrap();
    shared.add("/b", 2).unwrap();

    assert_eq!(shared.to_string(), ".\n└── /\n    ├── a\n    └── b\n");
}
