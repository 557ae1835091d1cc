use crate::action::Attribute;
use crate::paint::{Effect, Paint};
use serde::{Deserialize, Serialize};

/// A single attribute write issued against a host node.
///
/// Writes for one attribute of one node are applied strictly in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeWrite {
    /// Set (or clear, with `""`) the style id of an attribute.
    StyleId {
        attribute: Attribute,
        style_id: String,
    },
    /// Replace the fill or stroke array.
    Paints {
        attribute: Attribute,
        paints: Vec<Paint>,
    },
    /// Replace the effect array.
    Effects { effects: Vec<Effect> },
    /// Replace the fills of a text range.
    RangeFills {
        start: usize,
        end: usize,
        fills: Vec<Paint>,
    },
    /// Set the fill style id of a text range.
    RangeFillStyleId {
        start: usize,
        end: usize,
        style_id: String,
    },
}

impl AttributeWrite {
    pub fn attribute(&self) -> Attribute {
        match self {
            AttributeWrite::StyleId { attribute, .. }
            | AttributeWrite::Paints { attribute, .. } => *attribute,
            AttributeWrite::Effects { .. } => Attribute::Effect,
            AttributeWrite::RangeFills { .. } | AttributeWrite::RangeFillStyleId { .. } => {
                Attribute::Fill
            }
        }
    }

    /// Short identifier of the write kind, for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeWrite::StyleId { .. } => "style_id",
            AttributeWrite::Paints { .. } => "paints",
            AttributeWrite::Effects { .. } => "effects",
            AttributeWrite::RangeFills { .. } => "range_fills",
            AttributeWrite::RangeFillStyleId { .. } => "range_fill_style_id",
        }
    }
}
