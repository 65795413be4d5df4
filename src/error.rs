use thiserror::Error;

/// A broken structural invariant found by [`Tree::validate`](crate::Tree::validate). Trees built
/// only through this crate's mutators never produce one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A key sits on the wrong side of one of its ancestors.
    #[error("key at {path} is out of search order")]
    Unordered {
        /// Where the offending node lives, e.g. `root.left.right`.
        path: String,
    },

    /// A node's cached height disagrees with the height of its subtrees.
    #[error("node at {path} caches height {cached} but has height {actual}")]
    StaleHeight {
        /// Where the offending node lives.
        path: String,
        /// The height stored in the node.
        cached: usize,
        /// The height recomputed from its children.
        actual: usize,
    },

    /// A node's subtrees differ in height by more than one.
    #[error("node at {path} has balance factor {balance}")]
    Unbalanced {
        /// Where the offending node lives.
        path: String,
        /// Left height minus right height.
        balance: isize,
    },
}

/// An externally supplied tree that cannot be turned into nodes. Nothing is handed to the tree
/// engine when this is returned.
#[cfg(feature = "serde")]
#[derive(Error, Debug)]
pub enum MalformedTreeData {
    /// The input isn't valid JSON or doesn't have the record shape.
    #[error("invalid tree data: {0}")]
    Json(#[from] serde_json::Error),

    /// A record has no `key`.
    #[error("node at {path} has no key")]
    MissingKey {
        /// Where the record sits, e.g. `root.left`.
        path: String,
    },

    /// A `left` or `right` list holds more than one record.
    #[error("node at {path} has {count} {side} children, expected at most one")]
    TooManyChildren {
        /// Where the parent record sits.
        path: String,
        /// `"left"` or `"right"`.
        side: &'static str,
        /// How many records the list held.
        count: usize,
    },
}

/// Result type for ingestion.
#[cfg(feature = "serde")]
pub type IngestResult<T> = Result<T, MalformedTreeData>;
