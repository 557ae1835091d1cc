use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Envelope a host uses to hand a selection to paintfix as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub schema: String,

    /// Root nodes of the current selection, in document order.
    #[serde(default)]
    pub selection: Vec<Node>,
}

impl Document {
    pub fn new(selection: Vec<Node>) -> Self {
        Self {
            schema: crate::schema::PAINTFIX_DOCUMENT_V1.to_string(),
            selection,
        }
    }
}
