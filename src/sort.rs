//! Sibling ordering.

use std::cmp::Ordering;

use crate::escape::Grammar;
use crate::node::{Edge, Node};

/// Built-in orderings for [`Tree::sort`](crate::Tree::sort).
///
/// Whatever the technique, parameter edges stay behind literal edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortingTechnique {
    /// Heaviest subtree first
    Priority,
    /// Lightest subtree first
    ReversePriority,
    /// Byte-wise label order
    Label,
}

impl SortingTechnique {
    /// Sorts the edges of `root` and of every node below it.
    pub(crate) fn apply<V>(self, root: &mut Node<V>, grammar: &Grammar) {
        match self {
            SortingTechnique::Priority => sort_by_weight(root, grammar, |a, b| b.cmp(&a)),
            SortingTechnique::ReversePriority => sort_by_weight(root, grammar, |a, b| a.cmp(&b)),
            SortingTechnique::Label => {
                sort_edges(root, grammar, &mut |a: &Edge<V>, b: &Edge<V>| a.label.cmp(&b.label))
            }
        }
    }
}

fn params_last<V>(grammar: &Grammar, a: &Edge<V>, b: &Edge<V>) -> Ordering {
    grammar.is_param(&a.label).cmp(&grammar.is_param(&b.label))
}

/// Sorts the edges of `node` and of every node below it.
pub(crate) fn sort_edges<V, F>(root: &mut Node<V>, grammar: &Grammar, cmp: &mut F)
where
    F: FnMut(&Edge<V>, &Edge<V>) -> Ordering,
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        node.edges
            .sort_by(|a, b| params_last(grammar, a, b).then_with(|| cmp(a, b)));
        stack.extend(node.edges.iter_mut().map(|edge| &mut edge.node));
    }
}

// Orders siblings by the number of values below them. Weights are counted
// once for the whole tree, not per comparison.
fn sort_by_weight<V, F>(root: &mut Node<V>, grammar: &Grammar, cmp: F)
where
    F: Fn(usize, usize) -> Ordering,
{
    // Number the nodes so that a node's children get consecutive ids,
    // assigned after the node's own id.
    let mut weights = vec![0];
    let mut parents = vec![0];
    let mut first_child = vec![0];
    let mut stack = vec![(&*root, 0)];
    while let Some((node, id)) = stack.pop() {
        weights[id] = node.value.is_some() as usize;
        first_child[id] = weights.len();
        for edge in &node.edges {
            let child = weights.len();
            weights.push(0);
            parents.push(id);
            first_child.push(0);
            stack.push((&edge.node, child));
        }
    }
    for id in (1..weights.len()).rev() {
        weights[parents[id]] += weights[id];
    }

    let mut stack = vec![(root, 0)];
    while let Some((node, id)) = stack.pop() {
        let first = first_child[id];
        let mut tagged: Vec<(usize, Edge<V>)> = (first..).zip(node.edges.drain(..)).collect();
        tagged.sort_by(|(a_id, a), (b_id, b)| {
            params_last(grammar, a, b).then_with(|| cmp(weights[*a_id], weights[*b_id]))
        });

        let ids: Vec<usize> = tagged.iter().map(|(id, _)| *id).collect();
        node.edges.extend(tagged.into_iter().map(|(_, edge)| edge));
        stack.extend(node.edges.iter_mut().map(|edge| &mut edge.node).zip(ids));
    }
}
