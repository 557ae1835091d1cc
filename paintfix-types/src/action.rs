use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the three paintable attributes of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Fill,
    Stroke,
    Effect,
}

impl Attribute {
    /// Order in which an action visits the attributes of a node.
    pub const ALL: [Attribute; 3] = [Attribute::Fill, Attribute::Stroke, Attribute::Effect];

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Fill => "fill",
            Attribute::Stroke => "stroke",
            Attribute::Effect => "effect",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with the fills, strokes and effects of every selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    RemoveStyle,
    DetachStyle,
    RemoveVariables,
    DetachVariables,
    RemoveCustomColors,
    RemoveAll,
    ReplaceAll,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::RemoveStyle,
        Action::DetachStyle,
        Action::RemoveVariables,
        Action::DetachVariables,
        Action::RemoveCustomColors,
        Action::RemoveAll,
        Action::ReplaceAll,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::RemoveStyle => "remove-style",
            Action::DetachStyle => "detach-style",
            Action::RemoveVariables => "remove-variables",
            Action::DetachVariables => "detach-variables",
            Action::RemoveCustomColors => "remove-custom-colors",
            Action::RemoveAll => "remove-all",
            Action::ReplaceAll => "replace-all",
        }
    }

    /// One-line summary shown in listings.
    pub fn summary(self) -> &'static str {
        match self {
            Action::RemoveStyle => "Remove bound color styles together with their values",
            Action::DetachStyle => "Detach color styles, keeping their values as literals",
            Action::RemoveVariables => "Remove paints and effects bound to color variables",
            Action::DetachVariables => "Detach color variables, keeping the resolved colors",
            Action::RemoveCustomColors => "Remove paints and effects not bound to variables",
            Action::RemoveAll => "Remove every fill, stroke and effect",
            Action::ReplaceAll => "Replace fills and strokes with a highlight color",
        }
    }

    /// Message reported to the host once a batch completes.
    pub fn completion_message(self) -> &'static str {
        match self {
            Action::RemoveStyle => "Styles removed",
            Action::DetachStyle => "Styles detached",
            Action::RemoveVariables => "Color variables removed",
            Action::DetachVariables => "Color variables detached",
            Action::RemoveCustomColors => "Custom colors removed",
            Action::RemoveAll => "All colors removed",
            Action::ReplaceAll => "All colors replaced",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}'")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    /// Accepts the kebab-case identifier; `_` and case are normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// Which nodes of the selection an action targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Every selected node and all of its descendants.
    #[default]
    WholeSubtree,
    /// Descendants of the selected nodes only.
    NestedOnly,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::WholeSubtree, Scope::NestedOnly];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::WholeSubtree => "whole-subtree",
            Scope::NestedOnly => "nested-only",
        }
    }

    /// Human-facing label offered as a parameter suggestion.
    pub fn label(self) -> &'static str {
        match self {
            Scope::WholeSubtree => "All layers in selection",
            Scope::NestedOnly => "Only nested layers in selection",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scope '{0}'")]
pub struct ParseScopeError(pub String);

impl FromStr for Scope {
    type Err = ParseScopeError;

    /// Accepts the kebab-case identifier or the suggestion label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let key = trimmed.to_ascii_lowercase().replace('_', "-");
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == key || scope.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseScopeError(s.to_string()))
    }
}
