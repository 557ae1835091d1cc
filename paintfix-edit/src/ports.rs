//! Port a host implements so actions can read and mutate its document.

use crate::error::HostWriteError;
use paintfix_types::ops::AttributeWrite;
use paintfix_types::{Node, NodePath};

/// Mutable view of a host document.
///
/// `write` must complete before it returns: the next write for the same node
/// is planned from the state it leaves behind.
pub trait DocumentHost {
    /// Root selection, in document order.
    fn roots(&self) -> &[Node];

    fn node(&self, path: &NodePath) -> Option<&Node> {
        path.find(self.roots())
    }

    fn write(&mut self, path: &NodePath, write: &AttributeWrite) -> Result<(), HostWriteError>;
}
