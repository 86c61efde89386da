//! Nodes and edges of the radix tree.
//!
//! A `Node` owns its outgoing edges and every `Edge` owns the node it leads
//! to, so the tree is a strict ownership hierarchy. Subtrees displaced by a
//! split are moved under the new branch point, never shared.

use std::borrow::Cow;
use std::fmt;
use std::mem;

/// A vertex of the tree.
///
/// Nodes are handed out read-only by lookups and by [`Tree::root`](crate::Tree::root),
/// which is enough to walk and render the structure.
///
/// Every walk over the subtree (including drop and clone) uses an explicit
/// worklist, so arbitrarily deep trees never exhaust the call stack.
pub struct Node<V> {
    /// The value stored at this node, if a key terminates here
    pub(crate) value: Option<V>,

    /// Outgoing edges; parameter edges come last
    pub(crate) edges: Vec<Edge<V>>,

    /// Distance from the root
    pub(crate) depth: usize,
}

/// A labelled link from a parent node to its child.
#[derive(Clone)]
pub struct Edge<V> {
    /// The key fragment consumed along this edge (as a sequence of bytes)
    pub(crate) label: Vec<u8>,

    pub(crate) node: Node<V>,
}

impl<V> Node<V> {
    /// Creates a new empty node at the given depth
    pub(crate) fn new(depth: usize) -> Self {
        Node {
            value: None,
            edges: Vec::new(),
            depth,
        }
    }

    /// Creates a childless node holding a value
    pub(crate) fn leaf(value: V, depth: usize) -> Self {
        Node {
            value: Some(value),
            edges: Vec::new(),
            depth,
        }
    }

    /// Returns the value stored at this node, if any
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Returns the node's distance from the root
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns whether this node is a leaf node (has no edges)
    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the outgoing edges in lookup order
    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    /// Returns the number of values stored in this subtree.
    ///
    /// This is the weight used when sorting siblings by priority. It is
    /// computed on demand rather than stored.
    pub fn priority(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.value.is_some() {
                count += 1;
            }
            stack.extend(node.edges.iter().map(|edge| &edge.node));
        }

        count
    }

    /// Moves this node's value and edges into a new node one level deeper,
    /// leaving this node empty in place.
    pub(crate) fn split_off(&mut self) -> Node<V> {
        let mut displaced = Node {
            value: self.value.take(),
            edges: mem::take(&mut self.edges),
            depth: self.depth,
        };
        displaced.incr_depth();
        displaced
    }

    pub(crate) fn incr_depth(&mut self) {
        self.renumber(|depth| depth + 1);
    }

    pub(crate) fn decr_depth(&mut self) {
        self.renumber(|depth| depth - 1);
    }

    fn renumber<F>(&mut self, shift: F)
    where
        F: Fn(usize) -> usize,
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.depth = shift(node.depth);
            stack.extend(node.edges.iter_mut().map(|edge| &mut edge.node));
        }
    }
}

impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        // Detach grandchildren before each edge goes out of scope, so no
        // drop ever recurses.
        let mut pending = mem::take(&mut self.edges);
        while let Some(mut edge) = pending.pop() {
            pending.append(&mut edge.node.edges);
        }
    }
}

impl<V: Clone> Clone for Node<V> {
    fn clone(&self) -> Self {
        enum Step<'a, V> {
            Enter(&'a Node<V>),
            Leave(&'a Node<V>),
        }

        // Post-order: children are cloned before the node that owns them.
        let mut built: Vec<Node<V>> = Vec::new();
        let mut stack = vec![Step::Enter(self)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => {
                    stack.push(Step::Leave(node));
                    stack.extend(node.edges.iter().rev().map(|edge| Step::Enter(&edge.node)));
                }
                Step::Leave(node) => {
                    let children = built.split_off(built.len() - node.edges.len());
                    let edges = node
                        .edges
                        .iter()
                        .zip(children)
                        .map(|(edge, child)| Edge::new(edge.label.clone(), child))
                        .collect();
                    built.push(Node {
                        value: node.value.clone(),
                        edges,
                        depth: node.depth,
                    });
                }
            }
        }

        match built.pop() {
            Some(node) => node,
            None => Node::new(self.depth),
        }
    }
}

// Only one level is printed; `Display` on the tree renders the whole thing.
impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<Cow<'_, str>> = self.edges.iter().map(Edge::label_str).collect();
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("depth", &self.depth)
            .field("edges", &labels)
            .finish()
    }
}

impl<V: fmt::Debug> fmt::Debug for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("label", &self.label_str())
            .field("node", &self.node)
            .finish()
    }
}

impl<V> Edge<V> {
    pub(crate) fn new(label: Vec<u8>, node: Node<V>) -> Self {
        Edge { label, node }
    }

    /// Returns the raw label bytes
    pub fn label(&self) -> &[u8] {
        &self.label
    }

    /// Returns the label as text.
    ///
    /// Labels are split on byte boundaries, so a label may start or end in
    /// the middle of a multi-byte character; such bytes are replaced.
    pub fn label_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.label)
    }

    /// Returns the node this edge leads to
    pub fn node(&self) -> &Node<V> {
        &self.node
    }

    /// Folds a valueless single-child node into this edge.
    ///
    /// The edge's label absorbs the child edge's label and the grandchild
    /// takes the child's place. Returns whether a merge happened.
    pub(crate) fn compress(&mut self) -> bool {
        if self.node.value.is_some() || self.node.edges.len() != 1 {
            return false;
        }

        let only = match self.node.edges.pop() {
            Some(edge) => edge,
            None => return false,
        };
        let mut child = only.node;
        child.decr_depth();
        self.label.extend_from_slice(&only.label);
        self.node = child;

        true
    }
}
