//! Shared DTOs (schemas-as-code) for the paintfix workspace.
//!
//! # Design constraints
//! - Documents and reports are serialized with Figma-style camelCase field names.
//! - Paints and effects are plain values; mutation always works on clones.
//! - Prefer adding optional fields over changing semantics.

pub mod action;
pub mod document;
pub mod node;
pub mod ops;
pub mod paint;
pub mod report;
pub mod text;

pub use action::{Action, Attribute, ParseActionError, ParseScopeError, Scope};
pub use node::{Node, NodeKind, NodePath};
pub use paint::{
    AliasKind, BoundVariables, Color, Effect, EffectKind, Fills, MixedMarker, Paint, SolidPaint,
    VariableAlias,
};
pub use text::{FillSegment, StyleSegment, TextRange};

/// Schema identifiers.
pub mod schema {
    pub const PAINTFIX_DOCUMENT_V1: &str = "paintfix.document.v1";
    pub const PAINTFIX_REPORT_V1: &str = "paintfix.report.v1";
}
