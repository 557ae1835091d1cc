use crate::action::Attribute;
use crate::paint::{Effect, Fills, Paint};
use crate::text::TextRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of node kinds a document can contain.
///
/// Whether a kind is eligible for mutation, and which attributes it carries,
/// is decided by the capability table in `paintfix-domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    BooleanOperation,
    Component,
    ComponentSet,
    Ellipse,
    Frame,
    Instance,
    Line,
    Polygon,
    Rectangle,
    Section,
    Star,
    Text,
    Vector,
    ShapeWithText,
    Group,
    Slice,
    Sticky,
    Connector,
    Widget,
    Embed,
}

impl NodeKind {
    pub const ALL: [NodeKind; 20] = [
        NodeKind::BooleanOperation,
        NodeKind::Component,
        NodeKind::ComponentSet,
        NodeKind::Ellipse,
        NodeKind::Frame,
        NodeKind::Instance,
        NodeKind::Line,
        NodeKind::Polygon,
        NodeKind::Rectangle,
        NodeKind::Section,
        NodeKind::Star,
        NodeKind::Text,
        NodeKind::Vector,
        NodeKind::ShapeWithText,
        NodeKind::Group,
        NodeKind::Slice,
        NodeKind::Sticky,
        NodeKind::Connector,
        NodeKind::Widget,
        NodeKind::Embed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Frame => "FRAME",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Line => "LINE",
            NodeKind::Polygon => "POLYGON",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Section => "SECTION",
            NodeKind::Star => "STAR",
            NodeKind::Text => "TEXT",
            NodeKind::Vector => "VECTOR",
            NodeKind::ShapeWithText => "SHAPE_WITH_TEXT",
            NodeKind::Group => "GROUP",
            NodeKind::Slice => "SLICE",
            NodeKind::Sticky => "STICKY",
            NodeKind::Connector => "CONNECTOR",
            NodeKind::Widget => "WIDGET",
            NodeKind::Embed => "EMBED",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A design node. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Fills>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fill_style_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stroke_style_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub effect_style_id: String,

    /// Per-range fills of a text node. Authoritative when `fills` is mixed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_ranges: Vec<TextRange>,
}

impl Node {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            kind,
            name: name.into(),
            children: Vec::new(),
            fills: None,
            strokes: None,
            effects: None,
            fill_style_id: String::new(),
            stroke_style_id: String::new(),
            effect_style_id: String::new(),
            text_ranges: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_fills(mut self, fills: Vec<Paint>) -> Self {
        self.fills = Some(Fills::Paints(fills));
        self
    }

    pub fn with_strokes(mut self, strokes: Vec<Paint>) -> Self {
        self.strokes = Some(strokes);
        self
    }

    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Text node whose fill varies by range.
    pub fn with_text_ranges(mut self, ranges: Vec<TextRange>) -> Self {
        self.fills = Some(Fills::MIXED);
        self.text_ranges = ranges;
        self
    }

    pub fn with_style(mut self, attribute: Attribute, style_id: impl Into<String>) -> Self {
        self.set_style_id(attribute, style_id);
        self
    }

    pub fn style_id(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Fill => &self.fill_style_id,
            Attribute::Stroke => &self.stroke_style_id,
            Attribute::Effect => &self.effect_style_id,
        }
    }

    pub fn set_style_id(&mut self, attribute: Attribute, style_id: impl Into<String>) {
        let slot = match attribute {
            Attribute::Fill => &mut self.fill_style_id,
            Attribute::Stroke => &mut self.stroke_style_id,
            Attribute::Effect => &mut self.effect_style_id,
        };
        *slot = style_id.into();
    }

    pub fn has_mixed_fills(&self) -> bool {
        self.fills.as_ref().is_some_and(Fills::is_mixed)
    }

    /// Label used in logs and reports: the host id when present, else the name.
    pub fn label(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }
}

/// Position of a node inside a selection: root index, then child indices.
///
/// Paths are the identity the resolver hands to the dispatcher; two distinct
/// nodes never share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    pub fn find<'a>(&self, roots: &'a [Node]) -> Option<&'a Node> {
        let (first, rest) = self.0.split_first()?;
        let mut node = roots.get(*first)?;
        for idx in rest {
            node = node.children.get(*idx)?;
        }
        Some(node)
    }

    pub fn find_mut<'a>(&self, roots: &'a mut [Node]) -> Option<&'a mut Node> {
        let (first, rest) = self.0.split_first()?;
        let mut node = roots.get_mut(*first)?;
        for idx in rest {
            node = node.children.get_mut(*idx)?;
        }
        Some(node)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        f.write_str(&parts.join("/"))
    }
}
