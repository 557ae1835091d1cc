//! Embeddable core library for paintfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a design-tool host or a CLI.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DocumentHost`](ports::DocumentHost): read and mutate the node tree
//! - [`DocumentSource`](ports::DocumentSource): load a document
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides an in-memory document host and
//! filesystem-backed implementations of the other ports.
//!
//! # Entry points
//!
//! - [`run_action`](pipeline::run_action): apply one action to a selection
//! - [`write_run_artifacts`](pipeline::write_run_artifacts): persist the report and patch

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the palette so callers don't need paintfix-edit directly.
pub use paintfix_edit::{Palette, Swatch};
