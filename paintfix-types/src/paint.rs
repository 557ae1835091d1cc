use serde::{Deserialize, Serialize};

/// RGBA color with components in `0.0..=1.0`.
///
/// The engine never interprets colors; they are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

fn one() -> f32 {
    1.0
}

fn is_one(v: &f32) -> bool {
    *v == 1.0
}

fn yes() -> bool {
    true
}

/// Kind of a bound-variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AliasKind {
    VariableAlias,
    #[serde(other)]
    Unknown,
}

/// Reference from a color channel to a document-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    pub id: String,
}

impl VariableAlias {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: AliasKind::VariableAlias,
            id: id.into(),
        }
    }

    pub fn is_variable_alias(&self) -> bool {
        self.kind == AliasKind::VariableAlias
    }
}

/// Variable bindings carried by a paint or effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<VariableAlias>,
}

impl BoundVariables {
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    pub color: Color,
    #[serde(default = "one")]
    pub opacity: f32,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "BoundVariables::is_empty")]
    pub bound_variables: BoundVariables,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    pub gradient_type: GradientKind,
    #[serde(default)]
    pub stops: Vec<ColorStop>,
    #[serde(default = "one")]
    pub opacity: f32,
    #[serde(default = "yes")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    pub image_hash: String,
    #[serde(default)]
    pub scale_mode: String,
    #[serde(default = "one")]
    pub opacity: f32,
    #[serde(default = "yes")]
    pub visible: bool,
}

/// A single fill or stroke entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    Gradient(GradientPaint),
    Image(ImagePaint),
}

impl Paint {
    /// Unbound solid paint.
    pub fn solid(color: Color, opacity: f32) -> Self {
        Paint::Solid(SolidPaint {
            color,
            opacity,
            visible: true,
            bound_variables: BoundVariables::default(),
        })
    }

    /// Solid paint whose color channel is bound to `variable_id`.
    pub fn bound_solid(color: Color, variable_id: impl Into<String>) -> Self {
        Paint::Solid(SolidPaint {
            color,
            opacity: 1.0,
            visible: true,
            bound_variables: BoundVariables {
                color: Some(VariableAlias::new(variable_id)),
            },
        })
    }

    /// The color-channel binding. Only solid paints carry one.
    pub fn color_binding(&self) -> Option<&VariableAlias> {
        match self {
            Paint::Solid(solid) => solid.bound_variables.color.as_ref(),
            Paint::Gradient(_) | Paint::Image(_) => None,
        }
    }

    /// Drop the color-channel binding, keeping every other field.
    pub fn clear_color_binding(&mut self) {
        if let Paint::Solid(solid) = self {
            solid.bound_variables.color = None;
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Paint::Solid(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

/// A shadow or blur entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default)]
    pub radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
    #[serde(default, skip_serializing_if = "BoundVariables::is_empty")]
    pub bound_variables: BoundVariables,
}

impl Effect {
    pub fn drop_shadow(color: Color, radius: f32) -> Self {
        Self {
            kind: EffectKind::DropShadow,
            visible: true,
            radius,
            color: Some(color),
            offset: Some(Offset { x: 0.0, y: 4.0 }),
            bound_variables: BoundVariables::default(),
        }
    }

    pub fn layer_blur(radius: f32) -> Self {
        Self {
            kind: EffectKind::LayerBlur,
            visible: true,
            radius,
            color: None,
            offset: None,
            bound_variables: BoundVariables::default(),
        }
    }

    pub fn with_color_variable(mut self, variable_id: impl Into<String>) -> Self {
        self.bound_variables.color = Some(VariableAlias::new(variable_id));
        self
    }

    pub fn color_binding(&self) -> Option<&VariableAlias> {
        self.bound_variables.color.as_ref()
    }

    pub fn clear_color_binding(&mut self) {
        self.bound_variables.color = None;
    }
}

/// Sentinel for a text fill that varies by character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixedMarker {
    #[serde(rename = "MIXED")]
    Mixed,
}

/// Value of a node's `fills`.
///
/// `Mixed` is only legal on text nodes; the per-range values live in
/// [`Node::text_ranges`](crate::Node::text_ranges).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fills {
    Mixed(MixedMarker),
    Paints(Vec<Paint>),
}

impl Fills {
    pub const MIXED: Fills = Fills::Mixed(MixedMarker::Mixed);

    pub fn is_mixed(&self) -> bool {
        matches!(self, Fills::Mixed(_))
    }

    pub fn as_paints(&self) -> Option<&[Paint]> {
        match self {
            Fills::Paints(paints) => Some(paints),
            Fills::Mixed(_) => None,
        }
    }
}

impl From<Vec<Paint>> for Fills {
    fn from(paints: Vec<Paint>) -> Self {
        Fills::Paints(paints)
    }
}
