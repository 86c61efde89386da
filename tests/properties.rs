use std::collections::HashMap;

use quickcheck::{quickcheck, TestResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use radix_params::{Node, Settings, Tree};

// Keys over a tiny alphabet so that generated keys share prefixes and
// sometimes carry parameters.
fn keys_from(raw: Vec<Vec<u8>>) -> Vec<String> {
    raw.into_iter()
        .map(|bytes| {
            bytes
                .into_iter()
                .take(8)
                .map(|b| match b % 5 {
                    0 => 'a',
                    1 => 'b',
                    2 => 'é',
                    3 => '/',
                    _ => '@',
                })
                .collect::<String>()
        })
        .filter(|key| !key.is_empty())
        .collect()
}

fn is_literal(key: &str) -> bool {
    !key.contains('@')
}

// (nodes, label bytes) of the subtree, checking the structural invariants.
fn walk<V>(node: &Node<V>, is_root: bool) -> (usize, usize) {
    if !is_root {
        assert!(node.value().is_some() || node.edges().len() >= 2);
    }
    let mut nodes = 1;
    let mut bytes = 0;
    for edge in node.edges() {
        assert!(!edge.label().is_empty());
        assert_eq!(edge.node().depth(), node.depth() + 1);
        let (n, b) = walk(edge.node(), false);
        nodes += n;
        bytes += edge.label().len() + b;
    }
    (nodes, bytes)
}

fn empty() -> Tree<usize> {
    Tree::with_settings(Settings::default().debug(true).no_color(true)).unwrap()
}

// Adds every key the tree accepts, returning the tree and the accepted keys.
fn build(keys: &[String]) -> (Tree<usize>, Vec<String>) {
    let mut tree = empty();
    let mut accepted = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        if tree.add(key, i).is_ok() {
            accepted.push(key.clone());
        }
    }
    (tree, accepted)
}

quickcheck! {
    fn prop_round_trip(raw: Vec<Vec<u8>>) -> bool {
        let keys = keys_from(raw);
        let mut tree = empty();

        let mut expected = HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            if tree.add(key, i).is_ok() && is_literal(key) {
                expected.insert(key.as_str(), i);
            }
        }

        expected.iter().all(|(key, value)| {
            let (node, params) = tree.get(key);
            node.and_then(Node::value) == Some(value) && params.is_empty()
        })
    }

    fn prop_counters_match_structure(raw: Vec<Vec<u8>>) -> bool {
        let (tree, _) = build(&keys_from(raw));
        let (nodes, bytes) = walk(tree.root(), true);
        nodes == tree.len() && bytes == tree.size()
    }

    fn prop_rejected_add_leaves_tree_untouched(raw: Vec<Vec<u8>>) -> bool {
        let mut tree = empty();
        keys_from(raw).iter().enumerate().all(|(i, key)| {
            let before = tree.to_string();
            let (len, size) = (tree.len(), tree.size());
            match tree.add(key, i) {
                Ok(()) => true,
                Err(_) => tree.to_string() == before && tree.len() == len && tree.size() == size,
            }
        })
    }

    fn prop_order_independent(raw: Vec<Vec<u8>>, seed: u64) -> TestResult {
        // Which of two conflicting parameter keys wins depends on the order,
        // so only literal keys are compared.
        let mut keys: Vec<String> = keys_from(raw).into_iter().filter(|k| is_literal(k)).collect();
        keys.sort();
        keys.dedup();
        if keys.is_empty() {
            return TestResult::discard();
        }

        let (sorted, _) = build(&keys);
        keys.shuffle(&mut StdRng::seed_from_u64(seed));
        let (shuffled, _) = build(&keys);

        let same_values = keys.iter().all(|key| {
            let a = sorted.get(key).0;
            let b = shuffled.get(key).0;
            a.map(Node::depth) == b.map(Node::depth) && a.is_some() && b.is_some()
        });
        TestResult::from_bool(
            same_values && sorted.len() == shuffled.len() && sorted.size() == shuffled.size(),
        )
    }

    fn prop_delete_restores_canonical_shape(raw: Vec<Vec<u8>>, seed: u64) -> TestResult {
        let mut keys = keys_from(raw);
        keys.sort();
        keys.dedup();
        keys.shuffle(&mut StdRng::seed_from_u64(seed));

        let (mut tree, accepted) = build(&keys);
        let split = accepted.len() / 2;
        let (gone, kept) = accepted.split_at(split);

        for key in gone {
            tree.del(key);
        }
        let (nodes, _) = walk(tree.root(), true);

        let (fresh, fresh_accepted) = build(kept);
        if fresh_accepted.len() != kept.len() {
            return TestResult::discard();
        }

        // Parameter templates are looked up as paths, and a deleted literal
        // key may still match a surviving parameter route.
        let index: HashMap<&String, usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
        let value_of = |key: &String| tree.get(key).0.and_then(Node::value).copied();

        TestResult::from_bool(
            gone.iter().all(|key| value_of(key) != Some(index[key]))
                && kept.iter().filter(|k| is_literal(k)).all(|key| value_of(key) == Some(index[key]))
                && nodes == tree.len()
                && tree.len() == fresh.len(),
        )
    }
}
