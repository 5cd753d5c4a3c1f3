//! Page setup as edited in the letterhead form

use crate::error::Result;
use crate::layout::{FontFamily, FontMetrics, MetricsMeasurer, PageGeometry};
use serde::{Deserialize, Serialize};

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// Portrait (width, height) in millimetres
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            bottom: 20.0,
            left: 25.0,
            right: 15.0,
        }
    }
}

/// Heights of the reserved page zones, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneHeights {
    pub header: f32,
    pub addressee: f32,
    pub subject: f32,
    pub signature: f32,
    pub footer: f32,
}

impl Default for ZoneHeights {
    fn default() -> Self {
        Self {
            header: 45.0,
            addressee: 30.0,
            subject: 15.0,
            signature: 35.0,
            footer: 10.0,
        }
    }
}

/// Everything the form controls that affects pagination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub margins: Margins,
    pub zones: ZoneHeights,
    pub font_family: FontFamily,
    /// Font size in points
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
    /// Extra gap between paragraphs, in millimetres
    pub paragraph_spacing: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
            zones: ZoneHeights::default(),
            font_family: FontFamily::Serif,
            font_size: 12.0,
            line_spacing: 1.5,
            paragraph_spacing: 0.0,
        }
    }
}

impl PageSetup {
    /// Parse a setup from the form's JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sheet (width, height) after orientation
    pub fn sheet_size(&self) -> (f32, f32) {
        let (w, h) = self.paper.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn content_width(&self) -> f32 {
        self.sheet_size().0 - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.sheet_size().1 - self.margins.top - self.margins.bottom
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            page_height: self.content_height(),
            header_zone: self.zones.header,
            addressee_zone: self.zones.addressee,
            subject_zone: self.zones.subject,
            signature_zone: self.zones.signature,
            footer_reserve: self.zones.footer,
        }
    }

    pub fn font_metrics(&self) -> FontMetrics {
        FontMetrics::from_font(self.font_family, self.font_size, self.line_spacing)
    }

    /// Measurer matching this setup's font and body width
    pub fn measurer(&self) -> MetricsMeasurer {
        MetricsMeasurer::new(self.font_metrics(), self.content_width())
            .with_paragraph_spacing(self.paragraph_spacing)
    }
}
