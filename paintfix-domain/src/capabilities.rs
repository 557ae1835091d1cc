use paintfix_types::{Attribute, NodeKind};
use serde::Serialize;

/// Which paintable attributes a node kind carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub fill: bool,
    pub stroke: bool,
    pub effect: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities::new(false, false, false);
    pub const ALL: Capabilities = Capabilities::new(true, true, true);

    const fn new(fill: bool, stroke: bool, effect: bool) -> Self {
        Self {
            fill,
            stroke,
            effect,
        }
    }

    pub fn supports(self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Fill => self.fill,
            Attribute::Stroke => self.stroke,
            Attribute::Effect => self.effect,
        }
    }
}

/// Supported kinds and their capabilities. Kinds absent from the table are
/// never mutated.
const CAPABILITY_TABLE: &[(NodeKind, Capabilities)] = &[
    (NodeKind::BooleanOperation, Capabilities::ALL),
    (NodeKind::Component, Capabilities::ALL),
    (NodeKind::ComponentSet, Capabilities::ALL),
    (NodeKind::Ellipse, Capabilities::ALL),
    (NodeKind::Frame, Capabilities::ALL),
    (NodeKind::Instance, Capabilities::ALL),
    (NodeKind::Line, Capabilities::ALL),
    (NodeKind::Polygon, Capabilities::ALL),
    (NodeKind::Rectangle, Capabilities::ALL),
    (NodeKind::Section, Capabilities::new(true, false, false)),
    (NodeKind::Star, Capabilities::ALL),
    (NodeKind::Text, Capabilities::ALL),
    (NodeKind::Vector, Capabilities::ALL),
    (NodeKind::ShapeWithText, Capabilities::new(true, true, false)),
];

pub fn capabilities(kind: NodeKind) -> Capabilities {
    CAPABILITY_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, caps)| *caps)
        .unwrap_or(Capabilities::NONE)
}

pub fn is_supported(kind: NodeKind) -> bool {
    CAPABILITY_TABLE.iter().any(|(k, _)| *k == kind)
}

pub fn supported_kinds() -> impl Iterator<Item = NodeKind> {
    CAPABILITY_TABLE.iter().map(|(k, _)| *k)
}
