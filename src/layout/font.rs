//! Font metrics for layout
//!
//! All lengths are in millimetres so they compose directly with page
//! geometry.

use serde::{Deserialize, Serialize};

/// Millimetres per typographic point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Typeface families offered by the letterhead form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Serif,
    Sans,
    Mono,
}

impl FontFamily {
    /// Average advance width of a lowercase glyph, as a fraction of the em
    pub fn average_width_factor(&self) -> f32 {
        match self {
            FontFamily::Serif => 0.48,
            FontFamily::Sans => 0.52,
            FontFamily::Mono => 0.6,
        }
    }
}

/// Metrics needed for text layout
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Line height in millimetres
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::from_font(FontFamily::Serif, 12.0, 1.5)
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Approximate metrics for a family at `size_pt` with the given line spacing.
    ///
    /// Proportional families get narrower widths for punctuation and `i`/`l`
    /// style glyphs and wider ones for capitals; mono is uniform.
    pub fn from_font(family: FontFamily, size_pt: f32, line_spacing: f32) -> Self {
        let em = size_pt * MM_PER_PT;
        let avg = em * family.average_width_factor();

        let char_widths = (0u8..128)
            .map(|b| {
                let c = b as char;
                if family == FontFamily::Mono {
                    return avg;
                }
                match c {
                    ' ' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => avg * 0.55,
                    'i' | 'j' | 'l' | 't' | 'f' | 'I' | 'r' => avg * 0.6,
                    'm' | 'w' | 'M' | 'W' => avg * 1.55,
                    'A'..='Z' => avg * 1.3,
                    c if c.is_ascii_control() => 0.0,
                    _ => avg,
                }
            })
            .collect();

        Self {
            line_height: em * line_spacing,
            char_widths,
            // Cyrillic glyphs run slightly wider than the Latin average
            default_width: if family == FontFamily::Mono { avg } else { avg * 1.1 },
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }
}
