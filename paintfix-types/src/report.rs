use crate::action::{Action, Attribute, Scope};
use crate::node::{NodeKind, NodePath};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one action run over a selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintfixReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub request: RunRequest,
    pub summary: RunSummary,

    #[serde(default)]
    pub nodes: Vec<NodeResult>,

    /// The single human-readable completion message.
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentDigest>,
}

impl PaintfixReport {
    pub fn new(tool: ToolInfo, request: RunRequest, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::PAINTFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo {
                run_id: Uuid::new_v4(),
                started_at: Utc::now(),
                ended_at: None,
                dry_run,
            },
            request,
            summary: RunSummary::default(),
            nodes: vec![],
            message: String::new(),
            document: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub dry_run: bool,
}

/// Validated parameters of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub action: Action,
    pub scope: Scope,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_prefix: Option<String>,

    #[serde(default)]
    pub preserve_children: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub roots: u64,
    pub eligible: u64,
    pub changed: u64,
    pub writes: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeResult {
    pub path: NodePath,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub name: String,
    pub kind: NodeKind,
    pub status: NodeStatus,
    pub writes: u64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<WriteFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Changed,
    Unchanged,
    Failed,
}

/// A host write that was rejected; later writes of the same attribute were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    pub attribute: Attribute,
    pub write: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDigest {
    pub sha256_before: String,
    pub sha256_after: String,
}

impl DocumentDigest {
    pub fn changed(&self) -> bool {
        self.sha256_before != self.sha256_after
    }
}
