//! Configuration file loading for paintfix.
//!
//! Discovers and loads `paintfix.toml` next to the document being edited.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use paintfix_core::Palette;
use paintfix_core::settings::RunSettings;
use paintfix_types::Scope;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "paintfix.toml";

/// Top-level configuration from paintfix.toml.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaintfixConfig {
    /// Which nodes of the selection an action visits.
    pub selection: SelectionConfig,

    /// Paints written by `replace-all`.
    pub palette: Palette,

    /// Where run artifacts go.
    pub output: OutputConfig,
}

/// Selection section of the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// `whole-subtree` or `nested-only`. Validated when the action runs.
    pub scope: Option<String>,

    /// Name prefix of nodes to leave alone.
    pub exclude: Option<String>,

    /// Skip the whole subtree under an excluded node instead of only the node.
    pub preserve_children: bool,
}

/// Output section of the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Artifact directory, relative to the document's directory.
    pub out_dir: Option<Utf8PathBuf>,
}

/// Discover the paintfix.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a paintfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<PaintfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<PaintfixConfig> {
    let config: PaintfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<PaintfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(PaintfixConfig::default()),
    }
}

/// Run flags as given on the command line. `None` means "not passed".
#[derive(Debug, Clone, Default)]
pub struct RunFlags<'a> {
    pub action: &'a str,
    pub scope: Option<&'a str>,
    pub exclude: Option<&'a str>,
    pub preserve_children: bool,
    pub apply: bool,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedConfig {
    pub settings: RunSettings,

    /// Artifact directory from the config file, if any.
    pub out_dir: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: PaintfixConfig,
}

impl ConfigMerger {
    pub fn new(config: PaintfixConfig) -> Self {
        Self { config }
    }

    /// Merge with `run` CLI arguments.
    ///
    /// Scope and exclusion flags replace the file values when given.
    /// `--preserve-children` can only turn the file setting on.
    pub fn merge_run_args(self, flags: &RunFlags<'_>) -> MergedConfig {
        let selection = self.config.selection;

        let scope = flags
            .scope
            .map(str::to_string)
            .or(selection.scope)
            .unwrap_or_else(|| Scope::WholeSubtree.as_str().to_string());
        let excluded_prefix = flags.exclude.map(str::to_string).or(selection.exclude);

        MergedConfig {
            settings: RunSettings {
                action: flags.action.to_string(),
                scope,
                excluded_prefix,
                preserve_children: flags.preserve_children || selection.preserve_children,
                palette: self.config.palette,
                dry_run: !flags.apply,
            },
            out_dir: self.config.output.out_dir,
        }
    }
}
