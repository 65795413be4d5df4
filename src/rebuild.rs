//! Rebuilding a minimal-height tree from sorted keys, and the checkers that confirm a tree's
//! shape.

use tracing::debug;

use crate::error::InvariantViolation;
use crate::node::{height, Link, Node};
use crate::util::{NodePath, Side};
use crate::Tree;

impl<K> Tree<K> {
    /// Builds a tree of minimal height from keys in ascending order by repeatedly making the
    /// middle key the subtree root. `n` keys give a tree of height `⌈log2(n + 1)⌉`.
    ///
    /// Unsorted input is a caller bug; debug builds panic on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree = Tree::from_sorted(1..=7);
    ///
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(4));
    /// assert!(tree.is_well_balanced());
    /// ```
    pub fn from_sorted<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        debug_assert!(
            keys.windows(2).all(|pair| pair[0] <= pair[1]),
            "keys must be sorted"
        );

        let len = keys.len();
        let root = build(len, &mut keys.into_iter());
        debug!(len, height = height(root.as_deref()), "rebuilt balanced tree");
        Self { root }
    }

    /// Rebuilds this tree from its own in-order keys so it has minimal height. The keys are moved,
    /// not cloned.
    pub fn rebalance(&mut self)
    where
        K: Ord,
    {
        *self = Self::from_sorted(std::mem::take(self));
    }

    /// Whether every node's subtrees differ in height by at most one, checked through both the
    /// node's balance factor and the cached heights of its children. An empty tree is well
    /// balanced.
    pub fn is_well_balanced(&self) -> bool {
        well_balanced(self.root())
    }

    /// Checks every structural invariant: keys are in search order, each cached height matches
    /// its subtrees, and each balance factor is in `{-1, 0, 1}`. The first offending node is
    /// reported.
    ///
    /// Equal keys may end up on either side of one another after rotations, so the order check
    /// only requires the in-order keys to never decrease.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = (0..100).rev().collect();
    ///
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: Ord,
    {
        check(self.root(), None, None, &mut NodePath::default()).map(|_| ())
    }
}

/// Builds a subtree out of the next `len` keys.
fn build<K, I>(len: usize, keys: &mut I) -> Link<K>
where
    I: Iterator<Item = K>,
{
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    let left = build(mid, keys);
    let key = keys.next()?;
    let right = build(len - mid - 1, keys);
    Some(Node::with_children(key, left, right))
}

fn well_balanced<K>(node: Option<&Node<K>>) -> bool {
    let Some(node) = node else {
        return true;
    };

    node.balance_factor().abs() <= 1
        && height(node.left()).abs_diff(height(node.right())) <= 1
        && well_balanced(node.left())
        && well_balanced(node.right())
}

/// Validates the subtree at `node`, whose keys must lie within `[lower, upper]`, and returns its
/// actual height.
fn check<'a, K>(
    node: Option<&'a Node<K>>,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
    path: &mut NodePath,
) -> Result<usize, InvariantViolation>
where
    K: Ord,
{
    let Some(node) = node else {
        return Ok(0);
    };

    let below = lower.map_or(false, |lower| node.key < *lower);
    let above = upper.map_or(false, |upper| node.key > *upper);
    if below || above {
        return Err(InvariantViolation::Unordered {
            path: path.to_string(),
        });
    }

    path.push(Side::Left);
    let left = check(node.left(), lower, Some(&node.key), path)?;
    path.pop();

    path.push(Side::Right);
    let right = check(node.right(), Some(&node.key), upper, path)?;
    path.pop();

    let actual = left.max(right) + 1;
    if node.height != actual {
        return Err(InvariantViolation::StaleHeight {
            path: path.to_string(),
            cached: node.height,
            actual,
        });
    }

    let balance = left as isize - right as isize;
    if balance.abs() > 1 {
        return Err(InvariantViolation::Unbalanced {
            path: path.to_string(),
            balance,
        });
    }

    Ok(actual)
}
