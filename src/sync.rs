//! Thread-safe wrapper around [`Tree`].

use std::cmp::Ordering;
use std::fmt;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::node::{Edge, Node};
use crate::settings::Settings;
use crate::sort::SortingTechnique;
use crate::trie::Tree;
use crate::{Params, Result};

/// A [`Tree`] guarded by a single reader/writer lock.
///
/// `add`, `del` and `sort` hold the lock exclusively; lookups and counters
/// share it. The lock covers the whole tree, so the counters always agree
/// with the structure a reader sees.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use radix_params::SyncTree;
///
/// let tree = Arc::new(SyncTree::new());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || tree.add(&format!("/worker/{}", i), i).unwrap())
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(tree.get("/worker/2").0, Some(2));
/// ```
pub struct SyncTree<V> {
    inner: RwLock<Tree<V>>,
}

impl<V> SyncTree<V> {
    /// Creates a new thread-safe tree using the default settings.
    pub fn new() -> Self {
        SyncTree {
            inner: RwLock::new(Tree::new()),
        }
    }

    /// Creates a new thread-safe tree with custom settings.
    pub fn with_settings(settings: Settings) -> Result<Self> {
        Ok(SyncTree {
            inner: RwLock::new(Tree::with_settings(settings)?),
        })
    }

    /// Adds a key under the write lock. See [`Tree::add`].
    pub fn add(&self, key: &str, value: V) -> Result<()> {
        self.inner.write().add(key, value)
    }

    /// Removes a key under the write lock. See [`Tree::del`].
    pub fn del(&self, key: &str) {
        self.inner.write().del(key)
    }

    /// Looks up a key under the read lock, cloning the matched value.
    /// See [`Tree::get`].
    pub fn get(&self, key: &str) -> (Option<V>, Params)
    where
        V: Clone,
    {
        let tree = self.inner.read();
        let (node, params) = tree.get(key);
        (node.and_then(Node::value).cloned(), params)
    }

    /// Returns the total number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the total byte size of the labels stored along with values.
    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    /// Sorts every node's edges under the write lock. See [`Tree::sort`].
    pub fn sort(&self, technique: SortingTechnique) {
        self.inner.write().sort(technique)
    }

    /// Sorts every node's edges with a custom comparator under the write lock.
    pub fn sort_by<F>(&self, cmp: F)
    where
        F: FnMut(&Edge<V>, &Edge<V>) -> Ordering,
    {
        self.inner.write().sort_by(cmp)
    }

    /// Acquires the read lock, giving borrowed access to the tree.
    ///
    /// Writers are blocked until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, Tree<V>> {
        self.inner.read()
    }

    /// Consumes the wrapper, returning the tree.
    pub fn into_inner(self) -> Tree<V> {
        self.inner.into_inner()
    }
}

impl<V> Default for SyncTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<Tree<V>> for SyncTree<V> {
    fn from(tree: Tree<V>) -> Self {
        SyncTree {
            inner: RwLock::new(tree),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for SyncTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncTree")
            .field("inner", &*self.inner.read())
            .finish()
    }
}

impl<V: fmt::Debug> fmt::Display for SyncTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}
