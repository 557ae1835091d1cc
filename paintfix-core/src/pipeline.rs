//! Core action pipeline, extracted from the CLI.
//!
//! The entry point is I/O-agnostic: the document is read and mutated through
//! [`DocumentHost`] and artifacts are written through [`WritePort`].

use crate::ports::{DocumentHost, WritePort};
use crate::settings::RunSettings;
use anyhow::Context;
use chrono::Utc;
use diffy::PatchFormatter;
use paintfix_domain::{SelectionRule, resolve};
use paintfix_edit::apply_action;
use paintfix_types::document::Document;
use paintfix_types::report::{DocumentDigest, NodeStatus, PaintfixReport, RunRequest, ToolInfo};
use paintfix_types::{Action, Node, ParseActionError, ParseScopeError, Scope};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

/// Error type for pipeline results. Exit code 2 = validation, 1 = tool error.
///
/// Validation errors are raised before the first write.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Please make a selection")]
    NoSelection,
    #[error(transparent)]
    UnknownAction(#[from] ParseActionError),
    #[error(transparent)]
    UnknownScope(#[from] ParseScopeError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl RunError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, RunError::Internal(_))
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_validation() { 2 } else { 1 }
    }
}

/// Outcome of `run_action`.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: PaintfixReport,
    /// Unified diff of the pretty-printed document, empty when nothing changed.
    pub patch: String,
    /// The single completion message for the host to show.
    pub message: String,
}

/// Run one action over the host's current selection.
///
/// Parameters are validated first; on error nothing has been written. Write
/// failures on individual nodes are recorded in the report and do not stop
/// the batch.
pub fn run_action<H: DocumentHost + ?Sized>(
    settings: &RunSettings,
    host: &mut H,
    tool: ToolInfo,
) -> Result<RunOutcome, RunError> {
    if host.roots().is_empty() {
        return Err(RunError::NoSelection);
    }
    let action: Action = settings.action.parse()?;
    let scope: Scope = settings.scope.parse()?;

    let excluded_prefix = settings
        .excluded_prefix
        .clone()
        .filter(|p| !p.is_empty());
    let request = RunRequest {
        action,
        scope,
        excluded_prefix: excluded_prefix.clone(),
        preserve_children: settings.preserve_children,
    };
    let mut report = PaintfixReport::new(tool, request, settings.dry_run);

    let before = document_json(host.roots())?;

    let rule = SelectionRule {
        scope,
        excluded_prefix,
        preserve_children_of_excluded: settings.preserve_children,
    };
    let paths = resolve(host.roots(), &rule);
    report.summary.roots = host.roots().len() as u64;
    report.summary.eligible = paths.len() as u64;
    debug!(%action, %scope, eligible = paths.len(), "selection resolved");

    for path in &paths {
        match apply_action(host, path, action, &settings.palette) {
            Ok(result) => {
                report.summary.writes += result.writes;
                match result.status {
                    NodeStatus::Changed => report.summary.changed += 1,
                    NodeStatus::Failed => report.summary.failed += 1,
                    NodeStatus::Unchanged => {}
                }
                report.nodes.push(result);
            }
            Err(err) => {
                warn!(node = %path, error = %err, "node skipped");
                report.summary.failed += 1;
            }
        }
    }

    let after = document_json(host.roots())?;
    let patch = render_patch(&before, &after);
    report.document = Some(DocumentDigest {
        sha256_before: sha256_hex(before.as_bytes()),
        sha256_after: sha256_hex(after.as_bytes()),
    });

    let message = action.completion_message().to_string();
    report.message = message.clone();
    report.run.ended_at = Some(Utc::now());

    info!(
        %action,
        eligible = report.summary.eligible,
        changed = report.summary.changed,
        writes = report.summary.writes,
        failed = report.summary.failed,
        "run complete"
    );

    Ok(RunOutcome {
        report,
        patch,
        message,
    })
}

/// Write `report.json`, `report.md` and `patch.diff` into `out_dir`.
pub fn write_run_artifacts(
    outcome: &RunOutcome,
    out_dir: &camino::Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    #[cfg(feature = "reporting")]
    {
        let report_md = paintfix_render::render_report_md(&outcome.report);
        writer.write_file(&out_dir.join("report.md"), report_md.as_bytes())?;
    }

    writer.write_file(&out_dir.join("patch.diff"), outcome.patch.as_bytes())?;
    Ok(())
}

fn document_json(roots: &[Node]) -> anyhow::Result<String> {
    let doc = Document::new(roots.to_vec());
    let mut json = serde_json::to_string_pretty(&doc).context("serialize document")?;
    json.push('\n');
    Ok(json)
}

fn render_patch(before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }
    let patch = diffy::create_patch(before, after);
    let mut out = String::from("--- a/document.json\n+++ b/document.json\n");
    let body = PatchFormatter::new().fmt_patch(&patch).to_string();
    // diffy emits its own header lines; keep only the hunks.
    for line in body.lines().skip_while(|l| !l.starts_with("@@")) {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDocument;
    use crate::ports::HostWriteError;
    use camino::{Utf8Path, Utf8PathBuf};
    use paintfix_types::ops::AttributeWrite;
    use paintfix_types::{Attribute, Color, Effect, Fills, NodeKind, NodePath, Paint, TextRange};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemWritePort {
        files: Mutex<HashMap<String, Vec<u8>>>,
        dirs: Mutex<Vec<String>>,
    }

    impl WritePort for MemWritePort {
        fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
            let key = path.as_str().replace('\\', "/");
            self.files
                .lock()
                .expect("lock files")
                .insert(key, contents.to_vec());
            Ok(())
        }

        fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
            let key = path.as_str().replace('\\', "/");
            self.dirs.lock().expect("lock dirs").push(key);
            Ok(())
        }
    }

    /// Wraps an in-memory document and rejects writes to one node.
    struct FlakyHost {
        inner: InMemoryDocument,
        broken: NodePath,
    }

    impl DocumentHost for FlakyHost {
        fn roots(&self) -> &[Node] {
            self.inner.roots()
        }

        fn write(&mut self, path: &NodePath, write: &AttributeWrite) -> Result<(), HostWriteError> {
            if *path == self.broken {
                return Err(HostWriteError::Rejected("layer is locked".to_string()));
            }
            self.inner.write(path, write)
        }
    }

    fn tool() -> ToolInfo {
        ToolInfo {
            name: "paintfix".into(),
            version: Some("0.0.0-test".into()),
        }
    }

    fn gray() -> Paint {
        Paint::solid(Color::rgb(0.5, 0.5, 0.5), 1.0)
    }

    fn bound() -> Paint {
        Paint::bound_solid(Color::rgb(0.1, 0.4, 0.9), "VariableID:1:9")
    }

    fn card() -> Vec<Node> {
        vec![Node::new(NodeKind::Frame, "Card")
            .with_fills(vec![gray()])
            .with_style(Attribute::Fill, "S:surface")
            .with_children(vec![
                Node::new(NodeKind::Rectangle, "bg").with_fills(vec![gray(), bound()]),
                Node::new(NodeKind::Text, "title")
                    .with_fills(vec![bound()])
                    .with_effects(vec![Effect::layer_blur(1.0)]),
            ])]
    }

    fn settings(action: Action) -> RunSettings {
        RunSettings::for_action(action)
    }

    #[test]
    fn empty_selection_is_rejected_before_parsing() {
        let mut host = InMemoryDocument::new(vec![]);
        let mut s = settings(Action::RemoveAll);
        s.action = "nonsense".to_string();
        let err = run_action(&s, &mut host, tool()).unwrap_err();
        assert!(matches!(err, RunError::NoSelection));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Please make a selection");
    }

    #[test]
    fn unknown_action_and_scope_leave_document_untouched() {
        let mut host = InMemoryDocument::new(card());
        let original = host.clone();

        let mut s = settings(Action::RemoveAll);
        s.action = "paint-it-black".to_string();
        let err = run_action(&s, &mut host, tool()).unwrap_err();
        assert!(matches!(err, RunError::UnknownAction(_)));
        assert_eq!(err.to_string(), "unknown action 'paint-it-black'");

        let mut s = settings(Action::RemoveAll);
        s.scope = "everything".to_string();
        let err = run_action(&s, &mut host, tool()).unwrap_err();
        assert!(matches!(err, RunError::UnknownScope(_)));
        assert!(err.is_validation());

        assert_eq!(host, original);
    }

    #[test]
    fn remove_variables_reports_changes_and_patch() {
        let mut host = InMemoryDocument::new(card());
        let outcome = run_action(&settings(Action::RemoveVariables), &mut host, tool())
            .expect("run_action");

        assert_eq!(outcome.message, "Color variables removed");
        assert_eq!(outcome.report.summary.roots, 1);
        assert_eq!(outcome.report.summary.eligible, 3);
        assert_eq!(outcome.report.summary.changed, 2);
        assert_eq!(outcome.report.summary.writes, 2);
        assert_eq!(outcome.report.summary.failed, 0);
        assert!(outcome.patch.starts_with("--- a/document.json\n+++ b/document.json\n@@"));
        assert!(outcome.report.document.as_ref().is_some_and(DocumentDigest::changed));

        let roots = host.roots();
        assert_eq!(roots[0].children[0].fills, Some(Fills::Paints(vec![gray()])));
        assert_eq!(roots[0].children[1].fills, Some(Fills::Paints(vec![])));
        assert_eq!(roots[0].fill_style_id, "S:surface");
    }

    #[test]
    fn second_run_is_a_noop() {
        let mut host = InMemoryDocument::new(card());
        for action in Action::ALL {
            run_action(&settings(action), &mut host, tool()).expect("first run");
            let again = run_action(&settings(action), &mut host, tool()).expect("second run");
            assert_eq!(again.report.summary.writes, 0, "{action} was not idempotent");
            assert!(again.patch.is_empty());
            assert!(!again.report.document.as_ref().is_some_and(DocumentDigest::changed));
        }
    }

    #[test]
    fn write_failure_is_isolated_to_its_node() {
        let mut host = FlakyHost {
            inner: InMemoryDocument::new(card()),
            broken: NodePath::root(0).child(0),
        };
        let outcome =
            run_action(&settings(Action::RemoveAll), &mut host, tool()).expect("run_action");

        assert_eq!(outcome.report.summary.failed, 1);
        assert_eq!(outcome.report.summary.changed, 2);
        assert_eq!(outcome.message, "All colors removed");

        let failed = &outcome.report.nodes[1];
        assert_eq!(failed.name, "bg");
        assert_eq!(failed.status, NodeStatus::Failed);
        assert_eq!(failed.failures[0].message, "host rejected write: layer is locked");

        let roots = host.roots();
        assert_eq!(roots[0].children[0].fills, Some(Fills::Paints(vec![gray(), bound()])));
        assert_eq!(roots[0].children[1].fills, Some(Fills::Paints(vec![])));
        assert_eq!(roots[0].children[1].effects, Some(vec![]));
    }

    #[test]
    fn nested_only_with_exclusion() {
        let mut host = InMemoryDocument::new(card());
        let mut s = settings(Action::RemoveAll);
        s.scope = "Only nested layers in selection".to_string();
        s.excluded_prefix = Some("TITLE".to_string());

        let outcome = run_action(&s, &mut host, tool()).expect("run_action");
        let names: Vec<&str> = outcome.report.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["bg"]);
        assert_eq!(outcome.report.request.scope, Scope::NestedOnly);
        assert_eq!(host.roots()[0].fills, Some(Fills::Paints(vec![gray()])));
    }

    #[test]
    fn mixed_text_scenario_reasserts_styles() {
        let text = Node::new(NodeKind::Text, "Heading").with_text_ranges(vec![
            TextRange::new(0, 5, vec![gray()]).with_style("s1"),
            TextRange::new(5, 10, vec![bound()]),
        ]);
        let mut host = InMemoryDocument::new(vec![text]);

        let outcome = run_action(&settings(Action::RemoveVariables), &mut host, tool())
            .expect("run_action");
        assert_eq!(outcome.report.summary.writes, 3);

        let node = &host.roots()[0];
        assert_eq!(
            node.text_ranges,
            vec![
                TextRange::new(0, 5, vec![gray()]).with_style("s1"),
                TextRange::new(5, 10, vec![]),
            ]
        );
        assert!(node.has_mixed_fills());
    }

    #[test]
    fn write_run_artifacts_writes_expected_files() {
        let mut host = InMemoryDocument::new(card());
        let outcome =
            run_action(&settings(Action::DetachStyle), &mut host, tool()).expect("run_action");

        let writer = MemWritePort::default();
        let out_dir = Utf8PathBuf::from("out");
        write_run_artifacts(&outcome, &out_dir, &writer).expect("write artifacts");

        let files = writer.files.lock().expect("files");
        assert!(files.contains_key("out/report.json"));
        assert!(files.contains_key("out/report.md"));
        assert!(files.contains_key("out/patch.diff"));
        assert_eq!(writer.dirs.lock().expect("dirs").as_slice(), ["out".to_string()]);

        let report: serde_json::Value =
            serde_json::from_slice(&files["out/report.json"]).expect("report json");
        assert_eq!(report["schema"], "paintfix.report.v1");
        assert_eq!(report["message"], "Styles detached");
    }
}
