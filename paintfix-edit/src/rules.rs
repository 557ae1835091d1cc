use paintfix_domain::BindingState;
use paintfix_types::{Action, Attribute, Color, NodeKind, Paint};
use serde::{Deserialize, Serialize};

/// Array-level behaviour of one action on one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Styled: clear the style id and empty the array.
    RemoveStyle,
    /// Styled: clear the style id, keep the values as literals.
    DetachStyle,
    /// Unstyled: keep only the entries `Keep` selects.
    Filter(Keep),
    /// Unstyled: strip variable references, keep the resolved colors.
    DetachVariables,
    /// Clear the style id and empty the array.
    Clear,
    /// Clear the style id and write a single palette paint.
    Replace,
}

/// Which entries a filtering action keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keep {
    /// Literal entries, without a color variable.
    Custom,
    /// Entries whose color is bound to a variable.
    VariableBound,
}

impl Keep {
    pub fn state(self) -> BindingState {
        match self {
            Keep::Custom => BindingState::Custom,
            Keep::VariableBound => BindingState::VariableBound,
        }
    }
}

/// Per-attribute rule lookup for an [`Action`].
pub trait ActionRules {
    fn rule(self, attribute: Attribute) -> Rule;
}

impl ActionRules for Action {
    fn rule(self, attribute: Attribute) -> Rule {
        match (self, attribute) {
            (Action::RemoveStyle, _) => Rule::RemoveStyle,
            (Action::DetachStyle, _) => Rule::DetachStyle,
            (Action::RemoveVariables, _) => Rule::Filter(Keep::Custom),
            (Action::DetachVariables, _) => Rule::DetachVariables,
            (Action::RemoveCustomColors, _) => Rule::Filter(Keep::VariableBound),
            (Action::RemoveAll, _) => Rule::Clear,
            (Action::ReplaceAll, Attribute::Effect) => Rule::Clear,
            (Action::ReplaceAll, Attribute::Fill | Attribute::Stroke) => Rule::Replace,
        }
    }
}

/// A solid color with its paint opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
}

impl Swatch {
    pub const fn new(r: f32, g: f32, b: f32, opacity: f32) -> Self {
        Self { r, g, b, opacity }
    }

    pub fn paint(&self) -> Paint {
        Paint::solid(Color::rgb(self.r, self.g, self.b), self.opacity)
    }
}

const BRAND: (f32, f32, f32) = (1.0, 0.0, 0.431);

/// Paints written by `replace-all`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Text fills, opaque so the text stays legible.
    pub text_fill: Swatch,
    pub fill: Swatch,
    pub stroke: Swatch,
}

impl Default for Palette {
    fn default() -> Self {
        let (r, g, b) = BRAND;
        Self {
            text_fill: Swatch::new(r, g, b, 1.0),
            fill: Swatch::new(r, g, b, 0.1),
            stroke: Swatch::new(r, g, b, 0.1),
        }
    }
}

impl Palette {
    /// Replacement paint for `attribute` on a node of `kind`. Effects have none.
    pub fn replacement(&self, kind: NodeKind, attribute: Attribute) -> Option<Paint> {
        match attribute {
            Attribute::Fill if kind == NodeKind::Text => Some(self.text_fill.paint()),
            Attribute::Fill => Some(self.fill.paint()),
            Attribute::Stroke => Some(self.stroke.paint()),
            Attribute::Effect => None,
        }
    }
}
