use std::fmt;

/// Which child link a descent followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// The route from the root to the node currently being visited. Rendered as e.g.
/// `root.left.right` when reporting an error.
#[derive(Debug, Default)]
pub(crate) struct NodePath(Vec<Side>);

impl NodePath {
    pub(crate) fn push(&mut self, side: Side) {
        self.0.push(side);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for side in &self.0 {
            write!(f, ".{}", side.as_str())?;
        }
        Ok(())
    }
}
