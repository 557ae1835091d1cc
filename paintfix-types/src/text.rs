//! Character ranges of text nodes.

use crate::node::Node;
use crate::paint::Paint;
use serde::{Deserialize, Serialize};

/// A `[start, end)` span of a text node with its own fills and fill style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fill_style_id: String,
}

impl TextRange {
    pub fn new(start: usize, end: usize, fills: Vec<Paint>) -> Self {
        Self {
            start,
            end,
            fills,
            fill_style_id: String::new(),
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.fill_style_id = style_id.into();
        self
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maximal run of characters sharing one fill style id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSegment {
    pub start: usize,
    pub end: usize,
    pub style_id: String,
}

/// Maximal run of characters sharing one fill array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillSegment {
    pub start: usize,
    pub end: usize,
    pub fills: Vec<Paint>,
}

impl Node {
    /// Number of characters covered by the text ranges.
    pub fn text_len(&self) -> usize {
        self.text_ranges.iter().map(|r| r.end).max().unwrap_or(0)
    }

    /// Fill style ids, merged over adjacent ranges.
    pub fn fill_style_segments(&self) -> Vec<StyleSegment> {
        let mut out: Vec<StyleSegment> = Vec::new();
        for range in self.text_ranges.iter().filter(|r| !r.is_empty()) {
            match out.last_mut() {
                Some(last) if last.end == range.start && last.style_id == range.fill_style_id => {
                    last.end = range.end;
                }
                _ => out.push(StyleSegment {
                    start: range.start,
                    end: range.end,
                    style_id: range.fill_style_id.clone(),
                }),
            }
        }
        out
    }

    /// Fill arrays, merged over adjacent ranges.
    pub fn fill_segments(&self) -> Vec<FillSegment> {
        let mut out: Vec<FillSegment> = Vec::new();
        for range in self.text_ranges.iter().filter(|r| !r.is_empty()) {
            match out.last_mut() {
                Some(last) if last.end == range.start && last.fills == range.fills => {
                    last.end = range.end;
                }
                _ => out.push(FillSegment {
                    start: range.start,
                    end: range.end,
                    fills: range.fills.clone(),
                }),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::paint::Color;

    fn red() -> Paint {
        Paint::solid(Color::rgb(1.0, 0.0, 0.0), 1.0)
    }

    fn blue() -> Paint {
        Paint::solid(Color::rgb(0.0, 0.0, 1.0), 1.0)
    }

    #[test]
    fn segments_are_enumerated_independently() {
        let node = Node::new(NodeKind::Text, "t").with_text_ranges(vec![
            TextRange::new(0, 3, vec![red()]).with_style("S:a"),
            TextRange::new(3, 6, vec![red()]),
            TextRange::new(6, 9, vec![blue()]),
        ]);

        let styles = node.fill_style_segments();
        assert_eq!(
            styles,
            vec![
                StyleSegment {
                    start: 0,
                    end: 3,
                    style_id: "S:a".to_string()
                },
                StyleSegment {
                    start: 3,
                    end: 9,
                    style_id: String::new()
                },
            ]
        );

        let fills = node.fill_segments();
        assert_eq!(fills.len(), 2);
        assert_eq!((fills[0].start, fills[0].end), (0, 6));
        assert_eq!((fills[1].start, fills[1].end), (6, 9));
        assert_eq!(node.text_len(), 9);
    }

    #[test]
    fn empty_ranges_are_skipped() {
        let node = Node::new(NodeKind::Text, "t").with_text_ranges(vec![
            TextRange::new(0, 0, vec![red()]),
            TextRange::new(0, 2, vec![blue()]),
        ]);
        assert_eq!(node.fill_segments().len(), 1);
        assert_eq!(node.fill_style_segments().len(), 1);
    }
}
