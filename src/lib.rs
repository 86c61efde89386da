//! # Radix Params
//!
//! A radix tree (also known as a patricia trie) mapping string keys to values,
//! where keys may contain named parameter segments as used by path routers.
//!
//! ## Features
//!
//! - **Path compression**: edges carry the longest label shared by their subtree,
//!   nodes are split on insertion and merged back on deletion
//! - **Named parameters**: `@name` captures one path segment, `*name` captures the
//!   rest of the key; the bytes are configurable through [`Settings`]
//! - **Literal precedence**: literal edges are always tried before parameter edges
//! - **Thread-safe mode**: [`SyncTree`] guards a tree with a reader/writer lock
//!
//! ## Example
//!
//! ```rust
//! use radix_params::Tree;
//!
//! let mut tree = Tree::new();
//! tree.add("/users/@id", "user").unwrap();
//! tree.add("/users/new", "form").unwrap();
//!
//! let (node, params) = tree.get("/users/42");
//! assert_eq!(node.and_then(|n| n.value()), Some(&"user"));
//! assert_eq!(params["id"], "42");
//!
//! assert_eq!(tree.value("/users/new"), Some(&"form"));
//! ```

mod escape;
pub mod node;
mod render;
mod settings;
mod sort;
mod sync;
mod trie;
mod util;

// Re-export public types
pub use crate::node::{Edge, Node};
pub use crate::settings::Settings;
pub use crate::sort::SortingTechnique;
pub use crate::sync::SyncTree;
pub use crate::trie::Tree;

/// Parameters captured by a lookup, keyed by parameter name.
pub type Params = std::collections::HashMap<String, String>;

/// Result alias for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tree operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key misuses escape bytes, independently of the tree contents
    Invalid,
    /// The key conflicts with a parameter segment already in the tree
    Escape,
    /// The settings cannot describe a usable key grammar
    Settings(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Invalid => write!(f, "invalid escape sequence in key"),
            Error::Escape => write!(f, "escape symbols conflict"),
            Error::Settings(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
