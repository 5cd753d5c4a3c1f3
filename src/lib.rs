//! Letterhead core: the computational parts of the office-document tools
//!
//! This crate provides:
//! - Letter body pagination with letterhead, addressee, subject and
//!   signature zones, driven by a pluggable text measurer
//! - Font metrics and Unicode-aware line breaking for measuring in millimetres
//! - Social-insurance vacation entitlement (base + normal + abnormal bonus days)
//! - WASM bindings for the browser forms

pub mod config;
pub mod entitlement;
pub mod error;
pub mod layout;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use config::{Margins, Orientation, PageSetup, PaperSize, ZoneHeights};
pub use entitlement::{
    compute_entitlement, AbnormalMonths, Band, EntitlementCalculator, EntitlementResult,
    PaymentRecord, YearlyStat,
};
pub use error::{Error, Result};
pub use layout::{
    paginate, split_paragraphs, CharCountMeasurer, FontMetrics, LayoutVariant, MetricsMeasurer,
    PageGeometry, PageLayout, Pagination, TextMeasurer,
};

/// Paginate editor text with the measurer implied by `setup`
pub fn paginate_text(text: &str, setup: &PageSetup, variant: LayoutVariant) -> Pagination {
    let measurer = setup.measurer();
    paginate(split_paragraphs(text), &setup.geometry(), variant, &measurer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_letter_is_one_page() {
        let p = paginate_text(
            "Танд энэ өдрийн мэнд хүргэе.\n\nХүндэтгэсэн,",
            &PageSetup::default(),
            LayoutVariant::default(),
        );
        assert_eq!(p.page_count(), 1);
        assert_eq!(p.paragraphs().len(), 3);
    }

    #[test]
    fn test_long_letter_spills_onto_more_pages() {
        let body = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua.";
        let text = vec![body; 60].join("\n");
        let setup = PageSetup::default();
        let addressed = LayoutVariant {
            has_addressee_block: true,
        };

        let p = paginate_text(&text, &setup, addressed);
        assert!(p.page_count() > 2);
        assert_eq!(p.flatten().len(), 60);

        let geometry = setup.geometry();
        let last = p.pages().last().unwrap();
        assert!(last.content_height + geometry.signature_zone <= last.available_height);
    }
}
