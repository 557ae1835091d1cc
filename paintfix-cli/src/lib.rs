//! Library half of the `paintfix` binary: config discovery and action help.

pub mod config;
pub mod explain;
