//! Converting trees to and from the nested `{ key, left, right }` record format, where `left`
//! and `right` are lists of zero or one child record.
//!
//! The format carries no heights and no balance guarantee, so every conversion into a [`Tree`]
//! rebuilds whatever it reads into a minimal-height tree before handing it out.
//!
//! # Examples
//!
//! ```
//! use avl::ingest;
//!
//! // A right-leaning chain, as an external tool might write it.
//! let json = r#"{ "key": 1, "left": [], "right": [
//!     { "key": 2, "left": [], "right": [
//!         { "key": 3, "left": [], "right": [] }
//!     ] }
//! ] }"#;
//!
//! let tree = ingest::from_json::<i32>(json)?;
//!
//! assert_eq!(tree.root().map(|n| *n.key()), Some(2));
//! assert_eq!(tree.height(), 2);
//! # Ok::<(), avl::MalformedTreeData>(())
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{IngestResult, MalformedTreeData};
use crate::node::{Link, Node};
use crate::util::{NodePath, Side};
use crate::Tree;

/// One node of the external tree format. The root record of an empty tree has no key and no
/// children (`{}` in JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRecord<K> {
    /// The node's key. Only the root record of an empty tree may leave it out.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub key: Option<K>,
    /// Zero or one left child.
    #[serde(default = "Vec::new")]
    pub left: Vec<TreeRecord<K>>,
    /// Zero or one right child.
    #[serde(default = "Vec::new")]
    pub right: Vec<TreeRecord<K>>,
}

impl<K> TreeRecord<K> {
    /// The record of an empty tree.
    pub fn empty() -> Self {
        Self {
            key: None,
            left: Vec::new(),
            right: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.key.is_none() && self.left.is_empty() && self.right.is_empty()
    }
}

/// Converts a record into a minimal-height tree. The record's shape is only used to read its
/// keys in order; keys that aren't in search order are sorted (stably, so equal keys keep their
/// relative order) before the tree is rebuilt.
///
/// # Examples
///
/// ```
/// use avl::ingest::TreeRecord;
/// use avl::Tree;
///
/// let leaf = |key| TreeRecord { key: Some(key), ..TreeRecord::empty() };
/// let chain = TreeRecord {
///     key: Some(1),
///     left: vec![],
///     right: vec![TreeRecord { key: Some(2), left: vec![], right: vec![leaf(3)] }],
/// };
///
/// let mut tree = Tree::try_from(chain)?;
/// assert_eq!(tree.height(), 2);
///
/// tree.insert(4);
/// assert_eq!(tree.validate(), Ok(()));
/// # Ok::<(), avl::MalformedTreeData>(())
/// ```
impl<K> TryFrom<TreeRecord<K>> for Tree<K>
where
    K: Ord,
{
    type Error = MalformedTreeData;

    fn try_from(record: TreeRecord<K>) -> IngestResult<Self> {
        let imported = import_shape(record)?;
        debug!(height = imported.height(), "imported tree");
        Ok(normalize(imported))
    }
}

/// Structural conversion: the shape is kept exactly as given and every height is recomputed
/// bottom-up. The result may be unbalanced or even out of search order, so it never leaves this
/// module without going through [`normalize`].
fn import_shape<K>(record: TreeRecord<K>) -> IngestResult<Tree<K>> {
    if record.is_empty() {
        return Ok(Tree::new());
    }

    let root = convert(record, &mut NodePath::default())?;
    Ok(Tree { root: Some(root) })
}

fn convert<K>(record: TreeRecord<K>, path: &mut NodePath) -> IngestResult<Box<Node<K>>> {
    let TreeRecord { key, left, right } = record;
    let key = key.ok_or_else(|| MalformedTreeData::MissingKey {
        path: path.to_string(),
    })?;

    let left = convert_child(left, Side::Left, path)?;
    let right = convert_child(right, Side::Right, path)?;
    Ok(Node::with_children(key, left, right))
}

fn convert_child<K>(
    records: Vec<TreeRecord<K>>,
    side: Side,
    path: &mut NodePath,
) -> IngestResult<Link<K>> {
    if records.len() > 1 {
        return Err(MalformedTreeData::TooManyChildren {
            path: path.to_string(),
            side: side.as_str(),
            count: records.len(),
        });
    }

    path.push(side);
    let child = records
        .into_iter()
        .next()
        .map(|record| convert(record, path))
        .transpose()?;
    path.pop();
    Ok(child)
}

impl<K> Tree<K> {
    /// Exports this tree's shape in the record format. Heights are not part of the format.
    pub fn to_record(&self) -> TreeRecord<K>
    where
        K: Clone,
    {
        self.root().map_or_else(TreeRecord::empty, to_record)
    }
}

fn to_record<K: Clone>(node: &Node<K>) -> TreeRecord<K> {
    TreeRecord {
        key: Some(node.key.clone()),
        left: node.left().map(to_record).into_iter().collect(),
        right: node.right().map(to_record).into_iter().collect(),
    }
}

/// Rebuilds an imported tree into a minimal-height tree, sorting its keys first if they came out
/// of search order.
fn normalize<K>(tree: Tree<K>) -> Tree<K>
where
    K: Ord,
{
    let mut keys: Vec<K> = tree.into_iter().collect();
    if !keys.windows(2).all(|pair| pair[0] <= pair[1]) {
        warn!(len = keys.len(), "imported tree is out of search order, sorting its keys");
        keys.sort();
    }
    Tree::from_sorted(keys)
}

/// Parses a JSON tree record and converts it with [`Tree::try_from`].
pub fn from_json<K>(json: &str) -> IngestResult<Tree<K>>
where
    K: DeserializeOwned + Ord,
{
    let record: TreeRecord<K> = serde_json::from_str(json)?;
    Tree::try_from(record)
}
