//! Write planning for one attribute of one node.
//!
//! Planning reads the node as it is *now* and returns the writes needed to
//! reach the action's target state. Nothing is planned when the node is
//! already there, so a second run of the same action is a no-op.

use crate::rules::{ActionRules, Keep, Palette, Rule};
use crate::text;
use paintfix_domain::{Bindable, BindingState, capabilities, classify};
use paintfix_types::ops::AttributeWrite;
use paintfix_types::{Action, Attribute, Effect, Fills, Node, NodeKind, Paint};

/// An entry of a fill, stroke or effect array.
pub(crate) trait AttributeValue: Bindable + Clone + PartialEq {
    fn strip_binding(&mut self);

    fn array_write(attribute: Attribute, values: Vec<Self>) -> AttributeWrite;

    fn replacement(palette: &Palette, kind: NodeKind, attribute: Attribute) -> Option<Self>;
}

impl AttributeValue for Paint {
    fn strip_binding(&mut self) {
        self.clear_color_binding();
    }

    fn array_write(attribute: Attribute, paints: Vec<Self>) -> AttributeWrite {
        AttributeWrite::Paints { attribute, paints }
    }

    fn replacement(palette: &Palette, kind: NodeKind, attribute: Attribute) -> Option<Self> {
        palette.replacement(kind, attribute)
    }
}

impl AttributeValue for Effect {
    fn strip_binding(&mut self) {
        self.clear_color_binding();
    }

    fn array_write(_attribute: Attribute, effects: Vec<Self>) -> AttributeWrite {
        AttributeWrite::Effects { effects }
    }

    fn replacement(_palette: &Palette, _kind: NodeKind, _attribute: Attribute) -> Option<Self> {
        None
    }
}

/// Current value of an attribute array.
enum Current<'a, T> {
    Absent,
    Mixed,
    Values(&'a [T]),
}

impl<T> Current<'_, T> {
    /// Non-empty array, or the mixed sentinel.
    fn has_content(&self) -> bool {
        match self {
            Current::Absent => false,
            Current::Mixed => true,
            Current::Values(values) => !values.is_empty(),
        }
    }
}

/// Writes that apply `action` to `attribute` of `node`, in issue order.
///
/// Attributes the node kind does not carry, and absent arrays, yield nothing.
pub fn plan_attribute(
    node: &Node,
    attribute: Attribute,
    action: Action,
    palette: &Palette,
) -> Vec<AttributeWrite> {
    if !capabilities(node.kind).supports(attribute) {
        return Vec::new();
    }

    let rule = action.rule(attribute);
    match attribute {
        Attribute::Fill if node.kind == NodeKind::Text && node.has_mixed_fills() => {
            text::plan_mixed_fills(node, rule, palette)
        }
        Attribute::Fill => {
            let current = match &node.fills {
                None => Current::Absent,
                Some(Fills::Mixed(_)) => Current::Mixed,
                Some(Fills::Paints(paints)) => Current::Values(paints.as_slice()),
            };
            plan_values::<Paint>(node, attribute, current, rule, palette)
        }
        Attribute::Stroke => {
            let current = slice_of(node.strokes.as_deref());
            plan_values::<Paint>(node, attribute, current, rule, palette)
        }
        Attribute::Effect => {
            let current = slice_of(node.effects.as_deref());
            plan_values::<Effect>(node, attribute, current, rule, palette)
        }
    }
}

/// Writes for every attribute, in the order an action visits them.
///
/// Each attribute is planned from the same snapshot; the dispatcher re-plans
/// from fresh state instead of using this when writing.
pub fn plan_node(node: &Node, action: Action, palette: &Palette) -> Vec<AttributeWrite> {
    Attribute::ALL
        .into_iter()
        .flat_map(|attribute| plan_attribute(node, attribute, action, palette))
        .collect()
}

fn slice_of<T>(values: Option<&[T]>) -> Current<'_, T> {
    values.map_or(Current::Absent, Current::Values)
}

fn plan_values<T: AttributeValue>(
    node: &Node,
    attribute: Attribute,
    current: Current<'_, T>,
    rule: Rule,
    palette: &Palette,
) -> Vec<AttributeWrite> {
    let styled = !node.style_id(attribute).is_empty();
    let clear_style = || AttributeWrite::StyleId {
        attribute,
        style_id: String::new(),
    };

    let mut writes = Vec::new();
    match rule {
        Rule::RemoveStyle => {
            if styled {
                writes.push(clear_style());
                if current.has_content() {
                    writes.push(T::array_write(attribute, Vec::new()));
                }
            }
        }
        Rule::DetachStyle => {
            if styled {
                writes.push(clear_style());
            }
        }
        Rule::Filter(keep) => {
            if let (false, Current::Values(values)) = (styled, current) {
                let kept = filter_values(values, keep);
                if kept.as_slice() != values {
                    writes.push(T::array_write(attribute, kept));
                }
            }
        }
        Rule::DetachVariables => {
            if let (false, Current::Values(values)) = (styled, current) {
                let detached = detach_values(values);
                if detached.as_slice() != values {
                    writes.push(T::array_write(attribute, detached));
                }
            }
        }
        Rule::Clear => {
            if styled {
                writes.push(clear_style());
            }
            if current.has_content() {
                writes.push(T::array_write(attribute, Vec::new()));
            }
        }
        Rule::Replace => {
            if !current.has_content() {
                return writes;
            }
            let Some(paint) = T::replacement(palette, node.kind, attribute) else {
                return writes;
            };
            let target = vec![paint];
            let already = matches!(current, Current::Values(values) if values == target.as_slice());
            if styled {
                writes.push(clear_style());
            }
            if !already {
                writes.push(T::array_write(attribute, target));
            }
        }
    }
    writes
}

/// Entries of `values` classified as `keep`, in order.
pub(crate) fn filter_values<T: AttributeValue>(values: &[T], keep: Keep) -> Vec<T> {
    let state = keep.state();
    values
        .iter()
        .filter(|v| classify("", *v) == state)
        .cloned()
        .collect()
}

/// `values` with every variable-bound entry turned into a literal.
pub(crate) fn detach_values<T: AttributeValue>(values: &[T]) -> Vec<T> {
    values
        .iter()
        .cloned()
        .map(|mut v| {
            if classify("", &v) == BindingState::VariableBound {
                v.strip_binding();
            }
            v
        })
        .collect()
}
