//! Pagination for multi-page letters
//!
//! Paragraphs are greedily packed onto pages. The first page loses the
//! letterhead, addressee and subject zones; every page loses the footer
//! reserve. Once packed, the last page must also leave room for the
//! signature block, so its tail is pushed onto a fresh page until it does.

use crate::error::{Error, Result};
use crate::layout::measure::TextMeasurer;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, trace};

/// Vertical budget of a page, in millimetres.
///
/// `page_height` is the body box between the top and bottom margins; the
/// zones are carved out of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_height: f32,
    /// Letterhead block, first page only
    pub header_zone: f32,
    /// Addressee block, first page only and only in the addressed variant
    pub addressee_zone: f32,
    /// Subject line, first page only
    pub subject_zone: f32,
    /// Signature block, last page only
    pub signature_zone: f32,
    /// Page-number stamp, every page
    pub footer_reserve: f32,
}

impl PageGeometry {
    pub fn first_page_available(&self, variant: LayoutVariant) -> f32 {
        let addressee = if variant.has_addressee_block {
            self.addressee_zone
        } else {
            0.0
        };
        self.page_height - self.header_zone - addressee - self.subject_zone - self.footer_reserve
    }

    /// Continuation pages carry no header or subject block
    pub fn middle_page_available(&self) -> f32 {
        self.page_height - self.footer_reserve
    }

    /// Reject non-finite values and negative zones.
    ///
    /// Geometry that passes may still leave no room for text; pagination
    /// then degrades to one paragraph per page.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pageHeight", self.page_height),
            ("headerZone", self.header_zone),
            ("addresseeZone", self.addressee_zone),
            ("subjectZone", self.subject_zone),
            ("signatureZone", self.signature_zone),
            ("footerReserve", self.footer_reserve),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::invalid(format!("{name} must be a finite number")));
            }
            if value < 0.0 {
                return Err(Error::invalid(format!("{name} must not be negative")));
            }
        }
        if self.page_height <= 0.0 {
            return Err(Error::invalid("pageHeight must be positive"));
        }
        Ok(())
    }
}

/// Layout options that change which zones render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutVariant {
    pub has_addressee_block: bool,
}

/// Layout information for a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    /// Page index (0-based)
    pub page_index: usize,
    /// Indices of the paragraphs placed on this page
    pub paragraphs: Range<usize>,
    /// Height available to body text, before any signature reserve
    pub available_height: f32,
    /// Measured height of the placed paragraphs
    pub content_height: f32,
    pub is_first: bool,
    pub is_last: bool,
}

impl PageLayout {
    fn new(page_index: usize, paragraphs: Range<usize>, available_height: f32) -> Self {
        Self {
            page_index,
            paragraphs,
            available_height,
            content_height: 0.0,
            is_first: page_index == 0,
            is_last: false,
        }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// A first page whose body was pushed entirely onto the next page
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Check if this page contains a given paragraph
    pub fn contains_paragraph(&self, index: usize) -> bool {
        self.paragraphs.contains(&index)
    }

    pub fn has_signature(&self) -> bool {
        self.is_last
    }
}

/// Result of paginating a letter body
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    paragraphs: Vec<String>,
    pages: Vec<PageLayout>,
}

impl Pagination {
    pub fn pages(&self) -> &[PageLayout] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Source paragraphs after normalisation (never empty)
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn page_paragraphs(&self, page: &PageLayout) -> &[String] {
        &self.paragraphs[page.paragraphs.clone()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PageLayout, &[String])> + '_ {
        self.pages.iter().map(|p| (p, self.page_paragraphs(p)))
    }

    /// Concatenate every page's paragraphs in page order
    pub fn flatten(&self) -> Vec<&str> {
        self.iter()
            .flat_map(|(_, paras)| paras.iter().map(String::as_str))
            .collect()
    }
}

/// Split editor text into paragraphs, one per line
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Lay out `paragraphs` across pages.
///
/// Paragraphs are never split or reordered. A paragraph taller than its page
/// is placed alone and allowed to overflow. An empty input yields one page
/// holding a single blank paragraph.
pub fn paginate<M>(
    paragraphs: Vec<String>,
    geometry: &PageGeometry,
    variant: LayoutVariant,
    measurer: &M,
) -> Pagination
where
    M: TextMeasurer + ?Sized,
{
    let mut paragraphs = paragraphs;
    if paragraphs.is_empty() {
        paragraphs.push(String::new());
    }

    let first_available = geometry.first_page_available(variant);
    let middle_available = geometry.middle_page_available();

    measurer.begin_pass();
    let mut pages = fill_pages(&paragraphs, first_available, middle_available, measurer);
    reserve_signature(
        &paragraphs,
        &mut pages,
        geometry.signature_zone,
        middle_available,
        measurer,
    );

    if let Some(last) = pages.last_mut() {
        last.is_last = true;
    }

    debug!(
        paragraphs = paragraphs.len(),
        pages = pages.len(),
        first_available,
        middle_available,
        "paginated letter body"
    );

    Pagination { paragraphs, pages }
}

/// Greedy forward fill: each page takes paragraphs until the next one
/// would overflow, but always at least one.
fn fill_pages<M>(
    paragraphs: &[String],
    first_available: f32,
    middle_available: f32,
    measurer: &M,
) -> Vec<PageLayout>
where
    M: TextMeasurer + ?Sized,
{
    let mut pages = Vec::new();
    let mut start = 0;

    while start < paragraphs.len() {
        let available = if pages.is_empty() {
            first_available
        } else {
            middle_available
        };

        let mut end = start + 1;
        let mut height = measurer.measure(&paragraphs[start..end]);
        while end < paragraphs.len() {
            let next = measurer.measure(&paragraphs[start..end + 1]);
            if next > available {
                break;
            }
            end += 1;
            height = next;
        }

        let mut page = PageLayout::new(pages.len(), start..end, available);
        page.content_height = height;
        trace!(
            page = page.page_index,
            range = ?page.paragraphs,
            height,
            available,
            "filled page"
        );
        pages.push(page);
        start = end;
    }

    pages
}

/// Shrink the last page from its tail until the signature block fits,
/// moving the removed paragraphs onto a new trailing page.
///
/// Every page keeps at least one paragraph: a single paragraph that
/// cannot share its page with the signature stays where it is. The first
/// page may only be emptied when its whole body, moved onto a continuation
/// page, fits there together with the signature.
fn reserve_signature<M>(
    paragraphs: &[String],
    pages: &mut Vec<PageLayout>,
    signature_zone: f32,
    middle_available: f32,
    measurer: &M,
) where
    M: TextMeasurer + ?Sized,
{
    while let Some(last) = pages.last_mut() {
        let limit = last.available_height - signature_zone;
        if last.content_height <= limit {
            break;
        }

        let start = last.paragraphs.start;
        let end = last.paragraphs.end;
        let may_empty =
            last.is_first && last.content_height + signature_zone <= middle_available;
        let floor = if may_empty { start } else { start + 1 };
        if floor >= end {
            debug!(
                page = last.page_index,
                "signature overflows a single-paragraph page"
            );
            break;
        }

        let mut split = end - 1;
        let mut height = measurer.measure(&paragraphs[start..split]);
        while split > floor && height > limit {
            split -= 1;
            height = measurer.measure(&paragraphs[start..split]);
        }

        last.paragraphs.end = split;
        last.content_height = height;

        let mut page = PageLayout::new(pages.len(), split..end, middle_available);
        page.content_height = measurer.measure(&paragraphs[split..end]);
        trace!(
            from = page.page_index - 1,
            moved = end - split,
            "moved tail to make room for signature"
        );
        pages.push(page);
    }
}
