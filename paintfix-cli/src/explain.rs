//! Action explanations for the `paintfix explain` command.
//!
//! The per-attribute behaviour is derived from the edit rules, so the text
//! here only carries what the rules cannot say.

use paintfix_edit::{ActionRules, Keep, Rule};
use paintfix_types::{Action, Attribute};

/// Information about one action.
#[derive(Debug, Clone)]
pub struct ActionExplanation {
    pub action: Action,
    /// Human-readable title.
    pub title: &'static str,
    /// What the action is for.
    pub description: &'static str,
    /// Caveats worth knowing before running it.
    pub notes: &'static str,
}

impl ActionExplanation {
    pub fn key(&self) -> &'static str {
        self.action.as_str()
    }

    /// The rule applied to each attribute, in visiting order.
    pub fn rules(&self) -> [(Attribute, Rule); 3] {
        Attribute::ALL.map(|attribute| (attribute, self.action.rule(attribute)))
    }
}

/// Registry of all action explanations, in listing order.
pub static ACTION_REGISTRY: &[ActionExplanation] = &[
    ActionExplanation {
        action: Action::RemoveStyle,
        title: "Remove Styles",
        description: r#"Removes color styles from fills, strokes and effects.

Every attribute bound to a style loses both the style reference and the
values the style provided. Attributes without a style are left alone."#,
        notes: r#"On text whose fills vary by range, only the styled ranges are cleared.
Unstyled ranges keep their fills."#,
    },
    ActionExplanation {
        action: Action::DetachStyle,
        title: "Detach Styles",
        description: r#"Detaches color styles from fills, strokes and effects.

The style reference is dropped but the values stay on the node as local
paints and effects, so nothing changes visually."#,
        notes: r#"Variable bindings inside the detached values are kept."#,
    },
    ActionExplanation {
        action: Action::RemoveVariables,
        title: "Remove Color Variables",
        description: r#"Removes paints and effects whose color is bound to a variable.

Literal paints and effects, including gradients and images, are kept in
their original order."#,
        notes: r#"Attributes bound to a style are skipped; detach the style first to edit
the values it provides."#,
    },
    ActionExplanation {
        action: Action::DetachVariables,
        title: "Detach Color Variables",
        description: r#"Detaches color variables from paints and effects.

Each bound entry keeps its resolved color as a literal value. The number
and order of entries does not change."#,
        notes: r#"Attributes bound to a style are skipped."#,
    },
    ActionExplanation {
        action: Action::RemoveCustomColors,
        title: "Remove Custom Colors",
        description: r#"Removes paints and effects that are not bound to a color variable.

Use it to find hard-coded colors: whatever survives is driven by variables."#,
        notes: r#"Gradients and images never carry a color binding and are removed.
Attributes bound to a style are skipped."#,
    },
    ActionExplanation {
        action: Action::RemoveAll,
        title: "Remove All Colors",
        description: r#"Removes every fill, stroke and effect, together with their styles."#,
        notes: r#"Text fills are cleared across every character range."#,
    },
    ActionExplanation {
        action: Action::ReplaceAll,
        title: "Replace All Colors",
        description: r#"Replaces fills and strokes with a single highlight paint and removes
every effect.

Text fills get an opaque paint so the text stays legible. Other fills and
strokes get a low-opacity paint so the layer structure stays visible."#,
        notes: r#"The paints come from the [palette] section of paintfix.toml."#,
    },
];

/// Look up an action by its identifier, spelled any way `run --action` accepts.
pub fn lookup_action(key: &str) -> Option<&'static ActionExplanation> {
    let action: Action = key.parse().ok()?;
    ACTION_REGISTRY.iter().find(|e| e.action == action)
}

pub fn list_action_keys() -> Vec<&'static str> {
    ACTION_REGISTRY.iter().map(ActionExplanation::key).collect()
}

/// What `rule` does to one attribute.
pub fn rule_meaning(rule: Rule) -> &'static str {
    match rule {
        Rule::RemoveStyle => "if styled: clear the style and empty the values",
        Rule::DetachStyle => "if styled: clear the style, keep the values",
        Rule::Filter(Keep::Custom) => "if not styled: keep only literal entries",
        Rule::Filter(Keep::VariableBound) => "if not styled: keep only variable-bound entries",
        Rule::DetachVariables => "if not styled: replace variable colors with their values",
        Rule::Clear => "clear the style and empty the values",
        Rule::Replace => "clear the style and write the palette paint",
    }
}
