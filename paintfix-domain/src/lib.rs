//! Domain logic: decide *which* nodes and *which* values an action may touch.
//!
//! This crate owns the capability table, the binding classifier and the
//! selection resolver. It does not own *how* writes are issued; that's the
//! `paintfix-edit` crate.

mod capabilities;
mod classify;
mod selection;
mod suggest;

pub use capabilities::{Capabilities, capabilities, is_supported, supported_kinds};
pub use classify::{Bindable, BindingState, classify};
pub use selection::{SelectionRule, resolve, resolve_nodes};
pub use suggest::{suggest_actions, suggest_excluded_names, suggest_scopes};
