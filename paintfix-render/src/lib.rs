//! Rendering helpers (markdown) for human-readable artifacts.

use paintfix_types::report::{NodeStatus, PaintfixReport};

pub fn render_report_md(report: &PaintfixReport) -> String {
    let mut out = String::new();
    out.push_str("# paintfix run\n\n");
    out.push_str(&format!("> {}\n\n", report.message));

    out.push_str(&format!("- Action: `{}`\n", report.request.action));
    out.push_str(&format!("- Scope: {}\n", report.request.scope.label()));
    if let Some(prefix) = report.request.excluded_prefix.as_deref().filter(|p| !p.is_empty()) {
        out.push_str(&format!(
            "- Excluded: names starting with `{}`{}\n",
            prefix,
            if report.request.preserve_children {
                " (and their children)"
            } else {
                ""
            }
        ));
    }
    out.push_str(&format!(
        "- Mode: {}\n",
        if report.run.dry_run { "dry-run" } else { "applied" }
    ));
    out.push_str(&format!(
        "- Roots: {}\n- Eligible: {}\n- Changed: {}\n- Writes: {}\n- Failed: {}\n",
        report.summary.roots,
        report.summary.eligible,
        report.summary.changed,
        report.summary.writes,
        report.summary.failed
    ));
    if let Some(doc) = &report.document {
        out.push_str(&format!(
            "- Document sha256: `{}` -> `{}`\n",
            short(&doc.sha256_before),
            short(&doc.sha256_after)
        ));
    }
    out.push('\n');

    out.push_str("## Nodes\n\n");
    let touched: Vec<_> = report
        .nodes
        .iter()
        .filter(|n| n.status != NodeStatus::Unchanged)
        .collect();
    if touched.is_empty() {
        out.push_str("_No nodes changed._\n");
        return out;
    }

    out.push_str("| Path | Node | Kind | Status | Writes |\n");
    out.push_str("|------|------|------|--------|--------|\n");
    for node in &touched {
        out.push_str(&format!(
            "| `{}` | {} | `{}` | {} | {} |\n",
            node.path,
            escape_cell(&node.name),
            node.kind,
            status_label(node.status),
            node.writes
        ));
    }

    let failures: Vec<_> = touched.iter().filter(|n| !n.failures.is_empty()).collect();
    if !failures.is_empty() {
        out.push_str("\n## Failures\n\n");
        for node in failures {
            for f in &node.failures {
                out.push_str(&format!(
                    "- `{}` {} `{}`: {}\n",
                    node.path, f.attribute, f.write, f.message
                ));
            }
        }
    }

    out
}

fn status_label(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Changed => "changed",
        NodeStatus::Unchanged => "unchanged",
        NodeStatus::Failed => "failed",
    }
}

fn short(sha: &str) -> &str {
    sha.get(..12).unwrap_or(sha)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
