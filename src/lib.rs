//! This crate exposes an AVL tree: a Binary Search Tree (BST) that keeps itself balanced on
//! every insertion and deletion.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key no greater than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key no less than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`).
//!
//! ## AVL trees
//!
//! An AVL tree additionally keeps, for every `Node`, the heights of its two subtrees within one
//! of each other. Each `Node` caches its own height and every insert and delete recomputes the
//! heights along the path it touched, rotating subtrees wherever the difference reaches two.
//! This limits the height to roughly `1.44 * lg N` where `N` is the number of nodes.
//!
//! [`Tree::from_sorted`] builds a tree of the smallest possible height from sorted keys, which
//! is how trees read from an external source (see [`ingest`]) are normalized.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
#[cfg(feature = "serde")]
pub mod ingest;
mod node;
mod rebuild;
mod tree;
mod util;

pub use error::InvariantViolation;
#[cfg(feature = "serde")]
pub use error::{IngestResult, MalformedTreeData};
pub use node::{balance_factor, height, Node};
pub use tree::{IntoIter, Iter, Levels, Tree};
