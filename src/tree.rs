//! The owning [`Tree`] handle and the recursive insert/delete engine behind it.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [10, 20, 30, 40, 50, 25] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 20, 25, 30, 40, 50]);
//! assert_eq!(tree.height(), 3);
//!
//! // Deleting a key that isn't there changes nothing.
//! assert!(!tree.delete(&99));
//!
//! assert!(tree.delete(&10));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [20, 25, 30, 40, 50]);
//! assert!(tree.is_well_balanced());
//! ```

use std::cmp::Ordering;

use tracing::trace;

use crate::node::{
    balance_factor, height, rotate_left, rotate_left_right, rotate_right, rotate_right_left, Link,
    Node,
};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) of keys.
///
/// Equal keys are allowed. A key equal to a node's key is routed into that node's right subtree
/// on insertion, and deletion removes one occurrence at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree<K> {
    pub(crate) root: Link<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of keys in the tree, counting duplicates. This walks the whole tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// The number of levels in the tree. An empty tree has height 0.
    pub fn height(&self) -> usize {
        height(self.root())
    }

    /// The root node, for callers that want to walk the structure themselves.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Whether some node holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// assert!(tree.contains(&2));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right(),
            };
        }
        false
    }

    /// Inserts `key`, rebalancing on the way back up. Inserting a key that is already present
    /// adds another copy of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        self.root = Some(insert(self.root.take(), key));
    }

    /// Deletes one node holding `key` and returns whether there was one. If the tree does not
    /// contain the key, nothing happens.
    ///
    /// A node with two children takes over its in-order successor's key, which is then deleted
    /// from its right subtree. That copy is why `K: Clone` is needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree: Tree<_> = [1, 2, 3].into_iter().collect();
    ///
    /// assert!(tree.delete(&2));
    /// assert!(!tree.delete(&2));
    /// assert!(!tree.contains(&2));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord + Clone,
    {
        let mut deleted = false;
        self.root = delete(self.root.take(), key, &mut deleted);
        deleted
    }

    /// The keys in ascending order, duplicates included.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [30, 10, 20, 10].into_iter().collect();
    ///
    /// assert_eq!(tree.inorder(), [&10, &10, &20, &30]);
    /// ```
    pub fn inorder(&self) -> Vec<&K> {
        self.iter().collect()
    }

    /// Borrows the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root())
    }

    /// Walks the nodes in pre-order, yielding each with its depth (the root is at depth 0). This
    /// is the order a top-down renderer draws them in.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [1, 2, 3].into_iter().collect();
    /// let walked: Vec<_> = tree.levels().map(|(depth, n)| (depth, *n.key())).collect();
    ///
    /// assert_eq!(walked, [(0, 2), (1, 1), (1, 3)]);
    /// ```
    pub fn levels(&self) -> Levels<'_, K> {
        Levels {
            stack: self.root().map(|root| (0, root)).into_iter().collect(),
        }
    }
}

/// Inserts `key` into the subtree at `link` and returns the new subtree root.
fn insert<K>(link: Link<K>, key: K) -> Box<Node<K>>
where
    K: Ord,
{
    let Some(mut node) = link else {
        return Node::leaf(key);
    };

    // Whether the key lands in the outer grandchild subtree of the child we descend into. Only a
    // descent that doesn't rotate can unbalance this node, so the child we compare against here
    // is still the child afterwards.
    if key < node.key {
        let outer = node.left().map_or(true, |left| key < left.key);
        node.left = Some(insert(node.left.take(), key));
        node.fix_height();

        if node.balance_factor() > 1 {
            node = if outer {
                trace!("right rotation");
                rotate_right(node)
            } else {
                rotate_left_right(node)
            };
        }
    } else {
        let outer = node.right().map_or(true, |right| key >= right.key);
        node.right = Some(insert(node.right.take(), key));
        node.fix_height();

        if node.balance_factor() < -1 {
            node = if outer {
                trace!("left rotation");
                rotate_left(node)
            } else {
                rotate_right_left(node)
            };
        }
    }

    node.debug_assert_balanced();
    node
}

/// Deletes one node holding `key` from the subtree at `link` and returns the new subtree root.
/// `deleted` is set if a node was found.
fn delete<K>(link: Link<K>, key: &K, deleted: &mut bool) -> Link<K>
where
    K: Ord + Clone,
{
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = delete(node.left.take(), key, deleted),
        Ordering::Greater => node.right = delete(node.right.take(), key, deleted),
        Ordering::Equal => {
            *deleted = true;
            match (node.left.take(), node.right.take()) {
                (None, child) | (child, None) => return child,
                (left, Some(right)) => {
                    let successor = right.leftmost().key.clone();
                    let mut ignored = false;
                    node.left = left;
                    node.right = delete(Some(right), &successor, &mut ignored);
                    node.key = successor;
                }
            }
        }
    }

    node.fix_height();
    let node = rebalance(node);
    node.debug_assert_balanced();
    Some(node)
}

/// Restores the AVL invariant at `node` after a deletion below it shortened one side. The
/// rotation is picked from the taller child's own balance factor.
///
/// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
fn rebalance<K>(node: Box<Node<K>>) -> Box<Node<K>> {
    match node.balance_factor() {
        b if b > 1 => {
            if balance_factor(node.left()) >= 0 {
                trace!("right rotation");
                rotate_right(node)
            } else {
                rotate_left_right(node)
            }
        }
        b if b < -1 => {
            if balance_factor(node.right()) <= 0 {
                trace!("left rotation");
                rotate_left(node)
            } else {
                rotate_right_left(node)
            }
        }
        _ => node,
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> IntoIterator for Tree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.push_left_spine(self.root);
        iter
    }
}

/// A borrowing in-order iterator over a [`Tree`]'s keys. Created by [`Tree::iter`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.key)
    }
}

/// An owning in-order iterator over a [`Tree`]'s keys.
pub struct IntoIter<K> {
    stack: Vec<Box<Node<K>>>,
}

impl<K> IntoIter<K> {
    fn push_left_spine(&mut self, mut current: Link<K>) {
        while let Some(mut node) = current {
            current = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { key, right, .. } = *node;
        self.push_left_spine(right);
        Some(key)
    }
}

/// A pre-order walk over a [`Tree`]'s nodes with their depths. Created by [`Tree::levels`].
pub struct Levels<'a, K> {
    stack: Vec<(usize, &'a Node<K>)>,
}

impl<'a, K> Iterator for Levels<'a, K> {
    type Item = (usize, &'a Node<K>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        if let Some(right) = node.right() {
            self.stack.push((depth + 1, right));
        }
        if let Some(left) = node.left() {
            self.stack.push((depth + 1, left));
        }
        Some((depth, node))
    }
}
