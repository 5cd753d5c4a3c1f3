//! Flat page table for the zero-copy WASM bridge
//!
//! The export preview only needs page boundaries, so instead of a JSON
//! document per keystroke the paginator hands JS two typed arrays.
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header:
//! [0]     MAGIC (0x4C484450 = "LHDP" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     page_count
//! [3]     paragraph_count
//! [4..]   page data...
//!
//! Per-page: [paragraph_start, paragraph_end, flags]
//!   flags: bit0=is_first, bit1=is_last, bit2=is_empty (placeholder page)
//! ```
//!
//! ## f32 Buffer Layout:
//! ```text
//! Per-page: [available_height, content_height]
//! ```

use crate::layout::{PageLayout, Pagination};

/// Magic number for format validation: "LHDP" (LetterHead Data Pages)
pub const MAGIC: u32 = 0x4C484450;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 4;

/// Flags bitmask
pub const FLAG_IS_FIRST: u32 = 0b001;
pub const FLAG_IS_LAST: u32 = 0b010;
pub const FLAG_IS_EMPTY: u32 = 0b100;

/// Number of u32 values per page
pub const U32_PER_PAGE: usize = 3;

/// Number of f32 values per page
pub const F32_PER_PAGE: usize = 2;

/// Page table buffers
#[derive(Debug, Default)]
pub struct PageBuffer {
    /// Integer data (header, ranges, flags)
    pub u32_data: Vec<u32>,
    /// Float data (heights in millimetres)
    pub f32_data: Vec<f32>,
}

impl PageBuffer {
    pub fn from_pagination(pagination: &Pagination) -> Self {
        let pages = pagination.pages();
        let mut u32_data = Vec::with_capacity(HEADER_SIZE + pages.len() * U32_PER_PAGE);
        let mut f32_data = Vec::with_capacity(pages.len() * F32_PER_PAGE);

        u32_data.extend_from_slice(&[
            MAGIC,
            SCHEMA_VERSION,
            pages.len() as u32,
            pagination.paragraphs().len() as u32,
        ]);

        for page in pages {
            u32_data.extend_from_slice(&[
                page.paragraphs.start as u32,
                page.paragraphs.end as u32,
                page_flags(page),
            ]);
            f32_data.extend_from_slice(&[page.available_height, page.content_height]);
        }

        Self { u32_data, f32_data }
    }

    pub fn page_count(&self) -> usize {
        self.u32_data.get(2).copied().unwrap_or(0) as usize
    }

    /// Read back (start, end, flags) for a page
    pub fn page(&self, index: usize) -> Option<(u32, u32, u32)> {
        let base = HEADER_SIZE + index * U32_PER_PAGE;
        match self.u32_data.get(base..base + U32_PER_PAGE)? {
            [start, end, flags] => Some((*start, *end, *flags)),
            _ => None,
        }
    }
}

fn page_flags(page: &PageLayout) -> u32 {
    let mut flags = 0;
    if page.is_first {
        flags |= FLAG_IS_FIRST;
    }
    if page.is_last {
        flags |= FLAG_IS_LAST;
    }
    if page.is_empty() {
        flags |= FLAG_IS_EMPTY;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{paginate, LayoutVariant, PageGeometry};

    fn numeric(p: &[String]) -> f32 {
        p.iter().map(|s| s.parse::<f32>().unwrap_or(0.0)).sum()
    }

    #[test]
    fn test_page_table_layout() {
        let geometry = PageGeometry {
            page_height: 100.0,
            header_zone: 20.0,
            addressee_zone: 0.0,
            subject_zone: 0.0,
            signature_zone: 0.0,
            footer_reserve: 0.0,
        };
        let paras = ["50", "50", "50"].iter().map(|s| s.to_string()).collect();
        let pagination = paginate(paras, &geometry, LayoutVariant::default(), &numeric);
        let buffer = PageBuffer::from_pagination(&pagination);

        assert_eq!(&buffer.u32_data[..HEADER_SIZE], &[MAGIC, SCHEMA_VERSION, 2, 3]);
        assert_eq!(buffer.page_count(), 2);
        assert_eq!(buffer.page(0), Some((0, 1, FLAG_IS_FIRST)));
        assert_eq!(buffer.page(1), Some((1, 3, FLAG_IS_LAST)));
        assert_eq!(buffer.page(2), None);
        assert_eq!(buffer.f32_data, vec![80.0, 50.0, 100.0, 100.0]);
    }

    #[test]
    fn test_empty_first_page_flag() {
        let geometry = PageGeometry {
            page_height: 100.0,
            header_zone: 50.0,
            addressee_zone: 0.0,
            subject_zone: 0.0,
            signature_zone: 10.0,
            footer_reserve: 0.0,
        };
        let pagination = paginate(vec!["60".to_string()], &geometry, LayoutVariant::default(), &numeric);
        let buffer = PageBuffer::from_pagination(&pagination);
        assert_eq!(buffer.page(0), Some((0, 0, FLAG_IS_FIRST | FLAG_IS_EMPTY)));
        assert_eq!(buffer.page(1), Some((0, 1, FLAG_IS_LAST)));
    }
}
