//! Fills of text nodes whose value varies by character range.
//!
//! Style ids and fill values are enumerated separately and refined into
//! pieces that are uniform in both. Range fill writes drop the range's style
//! reference on the host, so whenever a fill is rewritten every original
//! style segment is reasserted afterwards.

use crate::mutate::{detach_values, filter_values};
use crate::rules::{Palette, Rule};
use paintfix_types::ops::AttributeWrite;
use paintfix_types::{Attribute, Node, Paint, StyleSegment};
use std::collections::BTreeSet;

/// A span uniform in both fill value and fill style id.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPiece {
    pub start: usize,
    pub end: usize,
    pub fills: Vec<Paint>,
    pub style_id: String,
}

impl TextPiece {
    fn is_styled(&self) -> bool {
        !self.style_id.is_empty()
    }
}

/// Pieces of `node`, refined at every fill and style boundary.
pub fn text_pieces(node: &Node) -> Vec<TextPiece> {
    let fills = node.fill_segments();
    let styles = node.fill_style_segments();

    let cuts: BTreeSet<usize> = fills
        .iter()
        .flat_map(|s| [s.start, s.end])
        .chain(styles.iter().flat_map(|s| [s.start, s.end]))
        .collect();
    let cuts: Vec<usize> = cuts.into_iter().collect();

    let mut pieces = Vec::new();
    for window in cuts.windows(2) {
        let (start, end) = (window[0], window[1]);
        let fill = fills.iter().find(|s| s.start <= start && end <= s.end);
        let style = styles.iter().find(|s| s.start <= start && end <= s.end);
        if let (Some(fill), Some(style)) = (fill, style) {
            pieces.push(TextPiece {
                start,
                end,
                fills: fill.fills.clone(),
                style_id: style.style_id.clone(),
            });
        }
    }
    pieces
}

pub(crate) fn plan_mixed_fills(node: &Node, rule: Rule, palette: &Palette) -> Vec<AttributeWrite> {
    match rule {
        Rule::Clear => replace_whole(node, Vec::new()),
        Rule::Replace => match palette.replacement(node.kind, Attribute::Fill) {
            Some(paint) => replace_whole(node, vec![paint]),
            None => Vec::new(),
        },
        Rule::RemoveStyle => text_pieces(node)
            .into_iter()
            .filter(TextPiece::is_styled)
            .flat_map(|piece| {
                [
                    clear_range_style(&piece),
                    AttributeWrite::RangeFills {
                        start: piece.start,
                        end: piece.end,
                        fills: Vec::new(),
                    },
                ]
            })
            .collect(),
        Rule::DetachStyle => text_pieces(node)
            .iter()
            .filter(|piece| piece.is_styled())
            .map(clear_range_style)
            .collect(),
        Rule::Filter(keep) => rewrite_unstyled(node, |fills| filter_values(fills, keep)),
        Rule::DetachVariables => rewrite_unstyled(node, detach_values::<Paint>),
    }
}

/// Node-level write over every range.
fn replace_whole(node: &Node, paints: Vec<Paint>) -> Vec<AttributeWrite> {
    let any_style = !node.fill_style_id.is_empty()
        || node.fill_style_segments().iter().any(|s| !s.style_id.is_empty());

    let mut writes = Vec::new();
    if any_style {
        writes.push(AttributeWrite::StyleId {
            attribute: Attribute::Fill,
            style_id: String::new(),
        });
    }
    writes.push(AttributeWrite::Paints {
        attribute: Attribute::Fill,
        paints,
    });
    writes
}

fn clear_range_style(piece: &TextPiece) -> AttributeWrite {
    AttributeWrite::RangeFillStyleId {
        start: piece.start,
        end: piece.end,
        style_id: String::new(),
    }
}

/// Rewrite the fills of unstyled pieces, then reassert the original styles.
fn rewrite_unstyled(
    node: &Node,
    transform: impl Fn(&[Paint]) -> Vec<Paint>,
) -> Vec<AttributeWrite> {
    let mut writes: Vec<AttributeWrite> = text_pieces(node)
        .into_iter()
        .filter(|piece| !piece.is_styled())
        .filter_map(|piece| {
            let fills = transform(&piece.fills);
            (fills != piece.fills).then_some(AttributeWrite::RangeFills {
                start: piece.start,
                end: piece.end,
                fills,
            })
        })
        .collect();

    if !writes.is_empty() {
        writes.extend(node.fill_style_segments().into_iter().map(reassert));
    }
    writes
}

fn reassert(segment: StyleSegment) -> AttributeWrite {
    AttributeWrite::RangeFillStyleId {
        start: segment.start,
        end: segment.end,
        style_id: segment.style_id,
    }
}
