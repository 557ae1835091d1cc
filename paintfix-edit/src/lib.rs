//! Edit engine for paintfix actions.
//!
//! Responsibilities:
//! - Plan the writes an action needs per attribute (`plan_attribute`).
//! - Handle text fills that vary by character range.
//! - Apply writes to a [`DocumentHost`], one node at a time, isolating failures.

pub mod error;
mod mutate;
mod ports;
mod rules;
mod text;

pub use error::{EditError, EditResult, HostWriteError};
pub use mutate::{plan_attribute, plan_node};
pub use ports::DocumentHost;
pub use rules::{ActionRules, Keep, Palette, Rule, Swatch};
pub use text::{TextPiece, text_pieces};

use paintfix_types::ops::AttributeWrite;
use paintfix_types::report::{NodeResult, NodeStatus, WriteFailure};
use paintfix_types::{Action, Attribute, NodePath};
use tracing::{debug, warn};

/// Apply `action` to the node at `path`.
///
/// Attributes are visited fill, stroke, effect. Each is planned from the
/// node's state after the previous attribute's writes. When a write fails the
/// remaining writes of that attribute are skipped and the failure is recorded;
/// other attributes still run. Writes already applied are not rolled back.
pub fn apply_action<H: DocumentHost + ?Sized>(
    host: &mut H,
    path: &NodePath,
    action: Action,
    palette: &Palette,
) -> EditResult<NodeResult> {
    let node = host
        .node(path)
        .ok_or_else(|| EditError::NodeNotFound(path.clone()))?;
    let mut result = NodeResult {
        path: path.clone(),
        id: node.id.clone(),
        name: node.name.clone(),
        kind: node.kind,
        status: NodeStatus::Unchanged,
        writes: 0,
        failures: vec![],
    };

    for attribute in Attribute::ALL {
        let node = host
            .node(path)
            .ok_or_else(|| EditError::NodeNotFound(path.clone()))?;
        let planned = plan_attribute(node, attribute, action, palette);

        for write in &planned {
            match apply_write(host, path, write) {
                Ok(()) => result.writes += 1,
                Err(err) => {
                    warn!(
                        node = %path,
                        %attribute,
                        error = %err,
                        "write failed; skipping rest of attribute"
                    );
                    let message = match err {
                        EditError::Write { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    result.failures.push(WriteFailure {
                        attribute,
                        write: write.kind().to_string(),
                        message,
                    });
                    break;
                }
            }
        }
    }

    result.status = if !result.failures.is_empty() {
        NodeStatus::Failed
    } else if result.writes > 0 {
        NodeStatus::Changed
    } else {
        NodeStatus::Unchanged
    };
    debug!(node = %path, writes = result.writes, status = ?result.status, "node done");
    Ok(result)
}

/// Issue one write, tagging a host failure with where it happened.
pub fn apply_write<H: DocumentHost + ?Sized>(
    host: &mut H,
    path: &NodePath,
    write: &AttributeWrite,
) -> EditResult<()> {
    debug!(node = %path, attribute = %write.attribute(), kind = write.kind(), "write");
    host.write(path, write).map_err(|source| EditError::Write {
        path: path.clone(),
        attribute: write.attribute(),
        kind: write.kind(),
        source,
    })
}
