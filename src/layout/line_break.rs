//! Line breaking algorithm

use crate::layout::font::FontMetrics;
use smallvec::{smallvec, SmallVec};
use std::hash::{Hash, Hasher};
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Byte ranges of the wrapped lines of one paragraph
pub type LineRanges = SmallVec<[Range<usize>; 4]>;

/// Wrapped layout of a single paragraph
#[derive(Debug, Clone)]
pub struct ParagraphLayout {
    /// Lines produced by line breaking
    pub lines: LineRanges,
    /// Sum of line heights
    pub total_height: f32,
    /// Hash of paragraph content for change detection
    pub content_hash: u64,
}

impl ParagraphLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Greedy line breaker over Unicode break opportunities
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Layout a paragraph into lines
    pub fn layout_paragraph(
        &self,
        text: &str,
        max_width: f32,
        metrics: &FontMetrics,
    ) -> ParagraphLayout {
        let lines = self.break_lines(text, max_width, metrics);
        ParagraphLayout {
            total_height: lines.len() as f32 * metrics.line_height,
            lines,
            content_hash: hash_text(text),
        }
    }

    /// Compute wrapped line ranges. An empty paragraph still has one line.
    pub fn break_lines(&self, text: &str, max_width: f32, metrics: &FontMetrics) -> LineRanges {
        if text.is_empty() {
            return smallvec![0..0];
        }

        let mut lines = LineRanges::new();
        let mut line_start = 0;
        let mut segment_start = 0;
        let mut x: f32 = 0.0;

        for (pos, opportunity) in linebreaks(text) {
            let segment = &text[segment_start..pos];
            // Trailing whitespace hangs past the margin
            let visible_width = text_width(segment.trim_end(), metrics);

            if x > 0.0 && x + visible_width > max_width {
                lines.push(line_start..segment_start);
                line_start = segment_start;
                x = 0.0;
            }

            if visible_width > max_width {
                // Emergency break inside a word that is wider than the line
                for (idx, grapheme) in segment.grapheme_indices(true) {
                    let w = grapheme_width(grapheme, metrics);
                    let is_space = grapheme.chars().all(char::is_whitespace);
                    if x > 0.0 && x + w > max_width && !is_space {
                        lines.push(line_start..segment_start + idx);
                        line_start = segment_start + idx;
                        x = 0.0;
                    }
                    x += w;
                }
            } else {
                x += text_width(segment, metrics);
            }

            if opportunity == BreakOpportunity::Mandatory {
                let end = line_start + text[line_start..pos].trim_end_matches(['\n', '\r']).len();
                lines.push(line_start..end);
                line_start = pos;
                x = 0.0;
            }
            segment_start = pos;
        }

        if lines.is_empty() {
            lines.push(0..text.len());
        }
        lines
    }
}

fn grapheme_width(grapheme: &str, metrics: &FontMetrics) -> f32 {
    if grapheme == "\t" {
        metrics.default_width * 4.0
    } else if grapheme.chars().all(|c| c.is_control()) {
        0.0
    } else {
        grapheme.chars().map(|c| metrics.width(c)).sum()
    }
}

/// Advance width of a run of text
pub fn text_width(text: &str, metrics: &FontMetrics) -> f32 {
    text.graphemes(true).map(|g| grapheme_width(g, metrics)).sum()
}

/// Hash text content for change detection
pub fn hash_text(text: &str) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}
