use paintfix_types::{Effect, Paint, VariableAlias};
use serde::Serialize;

/// How a paint or effect value is governed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingState {
    /// Literal value owned by the node.
    Custom,
    /// The attribute references a document style.
    StyleBound,
    /// The color channel is driven by a document variable.
    VariableBound,
}

/// A value whose color channel may be bound to a variable.
pub trait Bindable {
    fn color_binding(&self) -> Option<&VariableAlias>;
}

impl Bindable for Paint {
    fn color_binding(&self) -> Option<&VariableAlias> {
        Paint::color_binding(self)
    }
}

impl Bindable for Effect {
    fn color_binding(&self) -> Option<&VariableAlias> {
        Effect::color_binding(self)
    }
}

/// Classify `value` as it sits under an attribute whose style id is `style_id`.
///
/// The style signal is node-level and wins: entries under a styled attribute
/// are not inspected. Otherwise a value is variable-bound iff its color
/// channel carries a `VARIABLE_ALIAS` reference.
pub fn classify<B: Bindable + ?Sized>(style_id: &str, value: &B) -> BindingState {
    if !style_id.is_empty() {
        return BindingState::StyleBound;
    }
    match value.color_binding() {
        Some(alias) if alias.is_variable_alias() => BindingState::VariableBound,
        _ => BindingState::Custom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintfix_types::paint::{AliasKind, ColorStop, GradientKind, GradientPaint};
    use paintfix_types::Color;

    fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    #[test]
    fn unbound_solid_is_custom() {
        assert_eq!(classify("", &Paint::solid(black(), 1.0)), BindingState::Custom);
    }

    #[test]
    fn alias_bound_solid_is_variable_bound() {
        let paint = Paint::bound_solid(black(), "VariableID:1:2");
        assert_eq!(classify("", &paint), BindingState::VariableBound);
    }

    #[test]
    fn style_wins_over_variable_binding() {
        let paint = Paint::bound_solid(black(), "VariableID:1:2");
        assert_eq!(classify("S:abc", &paint), BindingState::StyleBound);
    }

    #[test]
    fn non_alias_binding_is_custom() {
        let mut paint = Paint::bound_solid(black(), "VariableID:1:2");
        if let Paint::Solid(solid) = &mut paint
            && let Some(alias) = solid.bound_variables.color.as_mut()
        {
            alias.kind = AliasKind::Unknown;
        }
        assert_eq!(classify("", &paint), BindingState::Custom);
    }

    #[test]
    fn gradients_are_always_custom() {
        let paint = Paint::Gradient(GradientPaint {
            gradient_type: GradientKind::Linear,
            stops: vec![
                ColorStop {
                    position: 0.0,
                    color: black(),
                },
                ColorStop {
                    position: 1.0,
                    color: Color::rgb(1.0, 1.0, 1.0),
                },
            ],
            opacity: 1.0,
            visible: true,
        });
        assert_eq!(classify("", &paint), BindingState::Custom);
    }

    #[test]
    fn effects_classify_like_paints() {
        let shadow = Effect::drop_shadow(black(), 4.0);
        assert_eq!(classify("", &shadow), BindingState::Custom);
        let bound = shadow.with_color_variable("VariableID:9:9");
        assert_eq!(classify("", &bound), BindingState::VariableBound);
        assert_eq!(classify("E:1", &bound), BindingState::StyleBound);
    }
}
