//! Text height measurement strategies
//!
//! The paginator never estimates heights itself. It asks a [`TextMeasurer`]
//! for the rendered height of a run of consecutive paragraphs, so the same
//! algorithm runs against real font metrics or against synthetic heights.

use crate::layout::font::FontMetrics;
use crate::layout::line_break::LineBreaker;
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};

/// Measures the rendered height of consecutive paragraphs.
///
/// Implementations must be idempotent: the same slice always yields the same
/// height. The height of a run is not required to be the sum of its parts.
pub trait TextMeasurer {
    fn measure(&self, paragraphs: &[String]) -> f32;

    /// Called once at the start of every pagination run
    fn begin_pass(&self) {}
}

impl<F> TextMeasurer for F
where
    F: Fn(&[String]) -> f32,
{
    fn measure(&self, paragraphs: &[String]) -> f32 {
        self(paragraphs)
    }
}

/// Measurer backed by font metrics and the line breaker.
///
/// Line counts are memoised per paragraph content, so repeated measurements while
/// filling a page only wrap each paragraph once. Each pass keeps only the
/// entries used by the pass before it, so the cache holds at most two
/// drafts' worth of paragraphs.
#[derive(Debug)]
pub struct MetricsMeasurer {
    metrics: FontMetrics,
    content_width: f32,
    /// Gap inserted between consecutive paragraphs
    paragraph_spacing: f32,
    breaker: LineBreaker,
    line_counts: RefCell<FxHashMap<String, CachedLines>>,
    pass: Cell<u64>,
}

#[derive(Debug, Clone, Copy)]
struct CachedLines {
    lines: usize,
    /// Last pass that read this entry
    pass: u64,
}

impl MetricsMeasurer {
    pub fn new(metrics: FontMetrics, content_width: f32) -> Self {
        Self {
            metrics,
            content_width,
            paragraph_spacing: 0.0,
            breaker: LineBreaker::new(),
            line_counts: RefCell::new(FxHashMap::default()),
            pass: Cell::new(0),
        }
    }

    pub fn with_paragraph_spacing(mut self, spacing: f32) -> Self {
        self.paragraph_spacing = spacing.max(0.0);
        self
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Number of wrapped lines for one paragraph
    pub fn line_count(&self, text: &str) -> usize {
        let pass = self.pass.get();
        if let Some(entry) = self.line_counts.borrow_mut().get_mut(text) {
            entry.pass = pass;
            return entry.lines;
        }
        let lines = self
            .breaker
            .break_lines(text, self.content_width, &self.metrics)
            .len();
        self.line_counts
            .borrow_mut()
            .insert(text.to_string(), CachedLines { lines, pass });
        lines
    }

    /// Number of paragraphs currently memoised
    pub fn cached_paragraphs(&self) -> usize {
        self.line_counts.borrow().len()
    }

    /// Drop memoised line counts, e.g. after the font changes
    pub fn clear_cache(&self) {
        self.line_counts.borrow_mut().clear();
    }
}

impl TextMeasurer for MetricsMeasurer {
    fn measure(&self, paragraphs: &[String]) -> f32 {
        if paragraphs.is_empty() {
            return 0.0;
        }
        let lines: usize = paragraphs.iter().map(|p| self.line_count(p)).sum();
        let gaps = (paragraphs.len() - 1) as f32 * self.paragraph_spacing;
        lines as f32 * self.metrics.line_height + gaps
    }

    fn begin_pass(&self) {
        let finished = self.pass.get();
        self.line_counts
            .borrow_mut()
            .retain(|_, entry| entry.pass == finished);
        self.pass.set(finished + 1);
    }
}

/// Deterministic measurer for tests and quick estimates.
///
/// Every character advances `char_width`; a paragraph occupies
/// `max(1, ceil(chars * char_width / content_width))` lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharCountMeasurer {
    pub char_width: f32,
    pub content_width: f32,
    pub line_height: f32,
}

impl CharCountMeasurer {
    pub fn new(char_width: f32, content_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            content_width,
            line_height,
        }
    }

    pub fn line_count(&self, text: &str) -> usize {
        let width = text.chars().count() as f32 * self.char_width;
        if self.content_width <= 0.0 {
            return text.chars().count().max(1);
        }
        ((width / self.content_width).ceil() as usize).max(1)
    }
}

impl TextMeasurer for CharCountMeasurer {
    fn measure(&self, paragraphs: &[String]) -> f32 {
        paragraphs
            .iter()
            .map(|p| self.line_count(p) as f32 * self.line_height)
            .sum()
    }
}
