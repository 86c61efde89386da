//! The main tree implementation.
//!
//! This module contains the `Tree` type, which provides the primary API for
//! inserting, removing and looking up keys.

use std::cmp::Ordering;

use log::{debug, trace};

use crate::escape::{Capture, Grammar};
use crate::node::{Edge, Node};
use crate::settings::Settings;
use crate::sort::{sort_edges, SortingTechnique};
use crate::util::prefix_match;
use crate::{Error, Params, Result};

/// A radix tree whose keys may contain parameter segments.
///
/// Every edge carries the longest label shared by the keys below it. Adding a
/// key splits an edge where the key diverges from it; deleting a key folds
/// valueless single-child nodes back into their parent edge.
///
/// Mutations take `&mut self`; wrap the tree in a [`SyncTree`](crate::SyncTree)
/// to share it between threads.
#[derive(Debug, Clone)]
pub struct Tree<V> {
    /// The root node of the tree
    pub(crate) root: Node<V>,

    /// Total number of nodes, including the root
    length: usize,

    /// Total byte size of the labels attributed to stored values
    size: usize,

    grammar: Grammar,

    pub(crate) settings: Settings,
}

impl<V> Tree<V> {
    /// Creates a new tree holding only its root, using the default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_params::Tree;
    ///
    /// let tree = Tree::<u32>::new();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn new() -> Self {
        let settings = Settings::default();
        Tree {
            root: Node::new(0),
            length: 1,
            size: 0,
            grammar: Grammar::new(&settings),
            settings,
        }
    }

    /// Creates a new tree with custom escape bytes, delimiter or rendering.
    ///
    /// Fails with [`Error::Settings`] when the grammar bytes are not distinct
    /// ASCII bytes.
    pub fn with_settings(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Tree {
            root: Node::new(0),
            length: 1,
            size: 0,
            grammar: Grammar::new(&settings),
            settings,
        })
    }

    /// Returns the total number of nodes, including the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_params::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add("tomato", 1).unwrap();
    /// tree.add("tornado", 2).unwrap();
    ///
    /// // (root) -> "to" -> "mato"
    /// //                -> "rnado"
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.length == 1
    }

    /// Returns the total byte size of the labels stored along with values.
    ///
    /// Splitting an existing edge does not add to the size, and deleting a key
    /// never shrinks it.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the settings this tree was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the root node, for read-only traversal.
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Adds a key to the tree, or replaces the value of an existing key.
    ///
    /// Empty keys are ignored. The key is checked for escape misuse before the
    /// tree is touched ([`Error::Invalid`]); a key whose parameter segment
    /// conflicts with one already in the tree is rejected with
    /// [`Error::Escape`]. A failed call leaves the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_params::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.add("/users/@id", 1).unwrap();
    ///
    /// assert_eq!(tree.add("/users/@name", 2), Err(Error::Escape));
    /// assert_eq!(tree.add("/abc@abc@", 3), Err(Error::Invalid));
    /// ```
    pub fn add(&mut self, key: &str, value: V) -> Result<()> {
        if key.is_empty() {
            return Ok(());
        }

        let grammar = self.grammar;
        if let Err(err) = grammar.validate(key.as_bytes()) {
            debug!("rejecting key {:?}: {}", key, err);
            return Err(err);
        }

        let mut node = &mut self.root;
        let mut rest = key.as_bytes();

        loop {
            let found = node.edges.iter().enumerate().find_map(|(i, edge)| {
                match prefix_match(rest, &edge.label) {
                    0 => None,
                    common => Some((i, common)),
                }
            });

            let (idx, common) = match found {
                Some(found) => found,
                None => {
                    // No edge shares a prefix: append a new leaf, keeping the
                    // parameter edge (if any) last.
                    //
                    // Example:
                    //  (root) -> ("users", v1)
                    //         -> ("@uid", v2)
                    //  then add ("all", v3)
                    //  (root) -> ("users", v1)
                    //         -> ("all", v3)
                    //         -> ("@uid", v2)
                    let param_last = node
                        .edges
                        .last()
                        .map_or(false, |edge| grammar.is_param(&edge.label));
                    if param_last && grammar.is_param(rest) {
                        return Err(conflict(key, "a parameter edge already exists here"));
                    }

                    let leaf = Edge::new(rest.to_vec(), Node::leaf(value, node.depth + 1));
                    if param_last {
                        let at = node.edges.len() - 1;
                        node.edges.insert(at, leaf);
                    } else {
                        node.edges.push(leaf);
                    }
                    trace!("appended {:?} at depth {}", lossy(rest), node.depth + 1);

                    self.length += 1;
                    self.size += rest.len();
                    return Ok(());
                }
            };

            let label_len = node.edges[idx].label.len();
            let open = grammar.is_open(&node.edges[idx].label[..common]);

            if common == label_len {
                if common == rest.len() {
                    // The key is exactly the edge's label, so just replace
                    // its node's value.
                    node.edges[idx].node.value = Some(value);
                    trace!("replaced value of {:?}", key);
                    return Ok(());
                }

                if open && rest[common] != grammar.delimiter() {
                    return Err(conflict(key, "the key extends a parameter name"));
                }

                rest = &rest[common..];
                node = &mut node.edges[idx].node;
                continue;
            }

            if common == rest.len() {
                // The key is a prefix of the edge's label.
                //
                // Example:
                //  (root) -> ("tomato", v1)
                //  then add "tom"
                //  (root) -> ("tom", v2) -> ("ato", v1)
                if open && node.edges[idx].label[common] != grammar.delimiter() {
                    return Err(conflict(key, "the key cuts a parameter name short"));
                }

                let edge = &mut node.edges[idx];
                let suffix = edge.label.split_off(common);
                let displaced = edge.node.split_off();
                trace!("split {:?} before {:?}", lossy(&edge.label), lossy(&suffix));

                edge.node.edges.push(Edge::new(suffix, displaced));
                edge.node.value = Some(value);

                self.length += 1;
                return Ok(());
            }

            // The key and the edge's label diverge after a common prefix:
            // break the edge into the prefix and two suffixes.
            //
            // Example:
            //  (root) -> ("tomato", v1)
            //  then add "tornado"
            //  (root) -> ("to", nil) -> ("mato", v1)
            //                        -> ("rnado", v2)
            if open {
                return Err(conflict(key, "two parameter names at the same position"));
            }
            let key_suffix = &rest[common..];
            if grammar.is_param(key_suffix) && grammar.is_param(&node.edges[idx].label[common..]) {
                return Err(conflict(key, "two parameter edges at the same position"));
            }

            let edge = &mut node.edges[idx];
            let suffix = edge.label.split_off(common);
            let displaced = edge.node.split_off();
            trace!(
                "forked {:?} into {:?} and {:?}",
                lossy(&edge.label),
                lossy(&suffix),
                lossy(key_suffix)
            );

            let depth = edge.node.depth + 1;
            let old = Edge::new(suffix, displaced);
            let new = Edge::new(key_suffix.to_vec(), Node::leaf(value, depth));
            edge.node.edges = if grammar.is_param(&old.label) {
                vec![new, old]
            } else {
                vec![old, new]
            };

            self.length += 2;
            self.size += key_suffix.len();
            return Ok(());
        }
    }

    /// Removes a key from the tree.
    ///
    /// The key is matched literally: to remove a parameterized key, pass the
    /// template it was added with (`"/users/@id"`), not a path it matches.
    /// Removing a key that is not stored does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_params::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add("/users/@id", 1).unwrap();
    ///
    /// tree.del("/users/42");
    /// assert_eq!(tree.value("/users/42"), Some(&1));
    ///
    /// tree.del("/users/@id");
    /// assert_eq!(tree.value("/users/42"), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn del(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }

        let removed = remove_from(&mut self.root, key.as_bytes());
        if removed > 0 {
            trace!("deleted {:?}, dropping {} node(s)", key, removed);
        }
        self.length -= removed;
    }

    /// Looks up a key, capturing the parameters of the matching route.
    ///
    /// At each node the first matching edge is followed, so literal edges win
    /// over parameter edges. The lookup fails if no edge matches, or if the
    /// key runs out on a node without a value; a failed lookup has no
    /// parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_params::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add("/path/@id/subpath/@id2", "foobar").unwrap();
    ///
    /// let (node, params) = tree.get("/path/123/subpath/456");
    /// assert_eq!(node.and_then(|n| n.value()), Some(&"foobar"));
    /// assert_eq!(params["id"], "123");
    /// assert_eq!(params["id2"], "456");
    /// ```
    pub fn get(&self, key: &str) -> (Option<&Node<V>>, Params) {
        if key.is_empty() {
            return (None, Params::new());
        }

        let mut captures = Vec::new();
        match lookup(&self.grammar, &self.root, key.as_bytes(), &mut captures) {
            Some(node) => {
                let params: Params = captures
                    .into_iter()
                    .map(|(name, value)| (lossy(name).into_owned(), lossy(value).into_owned()))
                    .collect();
                (Some(node), params)
            }
            None => (None, Params::new()),
        }
    }

    /// Retrieves the value matching the key, ignoring captured parameters.
    pub fn value(&self, key: &str) -> Option<&V> {
        self.get(key).0.and_then(Node::value)
    }

    /// Sorts every node's edges with one of the built-in techniques.
    ///
    /// Parameter edges stay behind literal edges regardless of the technique.
    pub fn sort(&mut self, technique: SortingTechnique) {
        technique.apply(&mut self.root, &self.grammar);
    }

    /// Sorts every node's edges with a custom comparator.
    ///
    /// Parameter edges stay behind literal edges regardless of the comparator.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Edge<V>, &Edge<V>) -> Ordering,
    {
        sort_edges(&mut self.root, &self.grammar, &mut cmp);
    }
}

// Helper for `del`, returns the number of nodes dropped.
fn remove_from<V>(root: &mut Node<V>, key: &[u8]) -> usize {
    // Spell the key out literally, remembering the edge taken at each level.
    let mut path = Vec::new();
    let mut node = &*root;
    let mut rest = key;
    while !rest.is_empty() {
        let idx = match node.edges.iter().position(|edge| rest.starts_with(&edge.label)) {
            Some(idx) => idx,
            None => return 0,
        };
        let edge = &node.edges[idx];
        rest = &rest[edge.label.len()..];
        node = &edge.node;
        path.push(idx);
    }
    if node.value.is_none() {
        return 0;
    }

    let target = match path.pop() {
        Some(idx) => idx,
        None => return 0,
    };
    let into_parent = path.pop();

    let mut grandparent = root;
    for idx in path {
        grandparent = &mut grandparent.edges[idx].node;
    }

    match into_parent {
        Some(idx) => {
            let edge = &mut grandparent.edges[idx];
            let removed = detach(&mut edge.node, target);
            // The parent may be left valueless with a single edge.
            if removed > 0 && edge.compress() {
                trace!("merged branch point into {:?}", lossy(&edge.label));
                return removed + 1;
            }
            removed
        }
        None => detach(grandparent, target),
    }
}

// Clears the value behind `node.edges[idx]`, dropping or folding the edge
// when it no longer branches.
fn detach<V>(node: &mut Node<V>, idx: usize) -> usize {
    let edge = &mut node.edges[idx];
    edge.node.value = None;

    match edge.node.edges.len() {
        0 => {
            node.edges.remove(idx);
            1
        }
        1 => {
            // Hand the only child up into this edge.
            edge.compress();
            1
        }
        _ => 0,
    }
}

// Greedy descent: the first edge matching at each node is taken, and a dead
// end below it ends the lookup.
fn lookup<'t, 'k, V>(
    grammar: &Grammar,
    root: &'t Node<V>,
    key: &'k [u8],
    captures: &mut Vec<Capture<'t, 'k>>,
) -> Option<&'t Node<V>> {
    let mut node = root;
    let mut rest = key;

    loop {
        let (child, consumed) = node.edges.iter().find_map(|edge| {
            grammar
                .match_label(&edge.label, rest, captures)
                .map(|consumed| (&edge.node, consumed))
        })?;

        rest = &rest[consumed..];
        if rest.is_empty() {
            return child.value.as_ref().map(|_| child);
        }
        node = child;
    }
}

fn conflict(key: &str, reason: &str) -> Error {
    debug!("rejecting key {:?}: {}", key, reason);
    Error::Escape
}

fn lossy(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

// Default implementation
impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}
