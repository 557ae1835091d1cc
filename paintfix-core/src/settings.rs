//! Clap-free settings for the action pipeline.

use paintfix_edit::Palette;
use paintfix_types::{Action, Scope};

/// Parameters of one run, as collected by the host.
///
/// `action` and `scope` stay strings so that validation happens in the
/// pipeline, before anything is mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub action: String,
    pub scope: String,
    pub excluded_prefix: Option<String>,
    pub preserve_children: bool,
    pub palette: Palette,

    /// Recorded in the report; persisting the result is the caller's concern.
    pub dry_run: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            action: Action::RemoveStyle.as_str().to_string(),
            scope: Scope::WholeSubtree.as_str().to_string(),
            excluded_prefix: None,
            preserve_children: false,
            palette: Palette::default(),
            dry_run: true,
        }
    }
}

impl RunSettings {
    pub fn for_action(action: Action) -> Self {
        Self {
            action: action.as_str().to_string(),
            ..Self::default()
        }
    }
}
