//! Letter body layout: font metrics, line breaking, measurement and pagination

pub mod font;
mod line_break;
mod measure;
mod pagination;

pub use font::{FontFamily, FontMetrics, MM_PER_PT};
pub use line_break::{hash_text, text_width, LineBreaker, LineRanges, ParagraphLayout};
pub use measure::{CharCountMeasurer, MetricsMeasurer, TextMeasurer};
pub use pagination::{
    paginate, split_paragraphs, LayoutVariant, PageGeometry, PageLayout, Pagination,
};
