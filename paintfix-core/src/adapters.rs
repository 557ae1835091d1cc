//! Default port implementations: an in-memory document host and filesystem I/O.

use crate::ports::{DocumentHost, DocumentSource, HostWriteError, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use paintfix_domain::capabilities;
use paintfix_types::document::Document;
use paintfix_types::ops::AttributeWrite;
use paintfix_types::{Attribute, Fills, Node, NodeKind, NodePath, Paint, TextRange};
use tracing::debug;

/// Document host over an owned node tree.
///
/// Writes follow the usual design-tool semantics: writing an attribute's
/// array detaches its style, writing a text range's fills drops that range's
/// style, and a text node's aggregate fill turns `MIXED` as soon as its
/// ranges disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDocument {
    document: Document,
}

impl InMemoryDocument {
    pub fn new(selection: Vec<Node>) -> Self {
        Self::from_document(Document::new(selection))
    }

    pub fn from_document(mut document: Document) -> Self {
        for root in &mut document.selection {
            normalize(root);
        }
        Self { document }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let document: Document = serde_json::from_str(json).context("parse document json")?;
        if document.schema != paintfix_types::schema::PAINTFIX_DOCUMENT_V1 {
            anyhow::bail!("unsupported document schema '{}'", document.schema);
        }
        Ok(Self::from_document(document))
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.document).context("serialize document")
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl DocumentHost for InMemoryDocument {
    fn roots(&self) -> &[Node] {
        &self.document.selection
    }

    fn write(&mut self, path: &NodePath, write: &AttributeWrite) -> Result<(), HostWriteError> {
        let node = path
            .find_mut(&mut self.document.selection)
            .ok_or_else(|| HostWriteError::NodeNotFound(path.clone()))?;

        let attribute = write.attribute();
        if !capabilities(node.kind).supports(attribute) {
            return Err(HostWriteError::Unsupported {
                kind: node.kind,
                attribute,
            });
        }

        match write {
            AttributeWrite::StyleId {
                attribute,
                style_id,
            } => {
                node.set_style_id(*attribute, style_id.clone());
                if *attribute == Attribute::Fill && has_ranges(node) {
                    for range in &mut node.text_ranges {
                        range.fill_style_id = style_id.clone();
                    }
                    refresh_text(node);
                }
            }
            AttributeWrite::Paints {
                attribute: Attribute::Fill,
                paints,
            } => {
                node.fill_style_id.clear();
                if has_ranges(node) {
                    for range in &mut node.text_ranges {
                        range.fills = paints.clone();
                        range.fill_style_id.clear();
                    }
                    refresh_text(node);
                } else {
                    node.fills = Some(Fills::Paints(paints.clone()));
                }
            }
            AttributeWrite::Paints {
                attribute: Attribute::Stroke,
                paints,
            } => {
                node.stroke_style_id.clear();
                node.strokes = Some(paints.clone());
            }
            AttributeWrite::Paints {
                attribute: Attribute::Effect,
                ..
            } => {
                return Err(HostWriteError::Rejected(
                    "effects cannot be written as paints".to_string(),
                ));
            }
            AttributeWrite::Effects { effects } => {
                node.effect_style_id.clear();
                node.effects = Some(effects.clone());
            }
            AttributeWrite::RangeFills { start, end, fills } => {
                let fills = fills.clone();
                write_range(node, *start, *end, |range| {
                    range.fills = fills.clone();
                    range.fill_style_id.clear();
                })?;
            }
            AttributeWrite::RangeFillStyleId {
                start,
                end,
                style_id,
            } => {
                write_range(node, *start, *end, |range| {
                    range.fill_style_id = style_id.clone();
                })?;
            }
        }

        debug!(node = %path, kind = write.kind(), "document updated");
        Ok(())
    }
}

fn has_ranges(node: &Node) -> bool {
    node.kind == NodeKind::Text && !node.text_ranges.is_empty()
}

fn normalize(node: &mut Node) {
    if has_ranges(node) {
        node.text_ranges.sort_by_key(|r| r.start);
        merge_ranges(&mut node.text_ranges);
        refresh_text(node);
    }
    for child in &mut node.children {
        normalize(child);
    }
}

fn write_range(
    node: &mut Node,
    start: usize,
    end: usize,
    update: impl Fn(&mut TextRange),
) -> Result<(), HostWriteError> {
    if node.kind != NodeKind::Text {
        return Err(HostWriteError::Unsupported {
            kind: node.kind,
            attribute: Attribute::Fill,
        });
    }
    let len = node.text_len();
    if start >= end || end > len {
        return Err(HostWriteError::InvalidRange { start, end, len });
    }

    split_at(&mut node.text_ranges, start);
    split_at(&mut node.text_ranges, end);
    for range in &mut node.text_ranges {
        if range.start >= start && range.end <= end {
            update(range);
        }
    }
    merge_ranges(&mut node.text_ranges);
    refresh_text(node);
    Ok(())
}

fn split_at(ranges: &mut Vec<TextRange>, pos: usize) {
    if let Some(i) = ranges.iter().position(|r| r.start < pos && pos < r.end) {
        let mut tail = ranges[i].clone();
        tail.start = pos;
        ranges[i].end = pos;
        ranges.insert(i + 1, tail);
    }
}

fn merge_ranges(ranges: &mut Vec<TextRange>) {
    let mut merged: Vec<TextRange> = Vec::with_capacity(ranges.len());
    for range in ranges.drain(..) {
        match merged.last_mut() {
            Some(last)
                if last.end == range.start
                    && last.fills == range.fills
                    && last.fill_style_id == range.fill_style_id =>
            {
                last.end = range.end;
            }
            _ => merged.push(range),
        }
    }
    *ranges = merged;
}

/// Recompute the aggregate fill and fill style of a text node from its ranges.
fn refresh_text(node: &mut Node) {
    let Some(first) = node.text_ranges.first() else {
        return;
    };
    let same_fills = node.text_ranges.iter().all(|r| r.fills == first.fills);
    let same_style = node
        .text_ranges
        .iter()
        .all(|r| r.fill_style_id == first.fill_style_id);

    let fills: Option<Vec<Paint>> = (same_fills && same_style).then(|| first.fills.clone());
    let style = if same_style {
        first.fill_style_id.clone()
    } else {
        String::new()
    };

    node.fills = Some(fills.map_or(Fills::MIXED, Fills::Paints));
    node.fill_style_id = style;
}

/// Loads a JSON document from disk.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    pub path: Utf8PathBuf,
}

impl FsDocumentSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl DocumentSource for FsDocumentSource {
    fn load_document(&self) -> anyhow::Result<Document> {
        let contents = fs::read_to_string(&self.path)?;
        let host = InMemoryDocument::from_json(&contents)
            .with_context(|| format!("load document {}", self.path))?;
        Ok(host.into_document())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
