//! The `Node` type, its height/balance accessors, and the two rotation primitives every mutator
//! rebalances with.

use tracing::trace;

/// An owning, possibly absent, child pointer. An empty subtree is `None`, never a sentinel node.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A single node of an AVL tree. Each node exclusively owns its two subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<K> {
    pub(crate) key: K,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

/// The height of a possibly absent node. An absent node has height 0.
///
/// # Examples
///
/// ```
/// use avl::{height, Tree};
///
/// let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
///
/// assert_eq!(height(tree.root()), 2);
/// assert_eq!(height(None::<&avl::Node<i32>>), 0);
/// ```
pub fn height<K>(node: Option<&Node<K>>) -> usize {
    node.map_or(0, |n| n.height)
}

/// The balance factor of a possibly absent node: left height minus right height. An absent node
/// has balance factor 0.
pub fn balance_factor<K>(node: Option<&Node<K>>) -> isize {
    node.map_or(0, Node::balance_factor)
}

impl<K> Node<K> {
    /// A new leaf holding `key`.
    pub(crate) fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// An interior node with both children already attached. The height is derived from the
    /// children, so they must already carry correct heights.
    pub(crate) fn with_children(key: K, left: Link<K>, right: Link<K>) -> Box<Self> {
        let mut node = Box::new(Self {
            key,
            height: 1,
            left,
            right,
        });
        node.fix_height();
        node
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The cached height of the subtree rooted here. Leaves have height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The difference in height between the left and right subtrees. Positive means the node is
    /// left-heavy. See [the Wikipedia page][wiki] for more details.
    ///
    /// Note that this is the opposite sign of the convention Wikipedia uses.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub fn balance_factor(&self) -> isize {
        height(self.left()) as isize - height(self.right()) as isize
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    pub(crate) fn fix_height(&mut self) {
        self.height = height(self.left()).max(height(self.right())) + 1;
    }

    /// In debug builds, asserts that the cached height is fresh and the node is AVL balanced.
    pub(crate) fn debug_assert_balanced(&self) {
        if cfg!(debug_assertions) {
            let left_height = height(self.left());
            let right_height = height(self.right());
            assert_eq!(self.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }

    /// The leftmost node of this subtree, i.e. the one holding the smallest key.
    pub(crate) fn leftmost(&self) -> &Self {
        let mut current = self;
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }
}

/// Rotate `old_root` to the right. This moves the left child up vertically and `old_root` down
/// vertically. Used to rebalance the tree when the left child is too tall. As such, it must only
/// be called when there _is_ a left child.
///
/// ## Panics
///
/// When called on a node without a left child.
///
/// # Diagram
///
/// ```text
///      old_root               new_root
///       /     \               /     \
///   new_root   z   rotate -> x    old_root
///    /  \                          /  \
///   x    y                        y    z
/// ```
pub(crate) fn rotate_right<K>(mut old_root: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = old_root.left.take() else {
        unreachable!("rotate right requires a left child");
    };

    old_root.left = new_root.right.take();
    old_root.fix_height();

    new_root.right = Some(old_root);
    new_root.fix_height();
    new_root
}

/// The mirror image of [`rotate_right`]: the right child becomes the subtree root.
///
/// ## Panics
///
/// When called on a node without a right child.
pub(crate) fn rotate_left<K>(mut old_root: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = old_root.right.take() else {
        unreachable!("rotate left requires a right child");
    };

    old_root.right = new_root.left.take();
    old_root.fix_height();

    new_root.left = Some(old_root);
    new_root.fix_height();
    new_root
}

/// Rotates the left child left and then `node` right.
pub(crate) fn rotate_left_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    trace!("left-right rotation");
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

/// Rotates the right child right and then `node` left.
pub(crate) fn rotate_right_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    trace!("right-left rotation");
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}
