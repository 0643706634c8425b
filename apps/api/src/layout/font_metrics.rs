//! Static font-metric tables for the two export font faces.
#![allow(dead_code)]
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Helvetica AFM metrics rounded to two decimals. Static tables are an
//! intentional approximation — they catch real layout decisions (where a line
//! wraps, where a bold run ends) while tolerating sub-millimetre ambiguity.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Points to millimetres (1 pt = 1/72 inch, 1 inch = 25.4 mm).
pub const PT_TO_MM: f32 = 0.352_778;

// ────────────────────────────────────────────────────────────────────────────
// Font face enum
// ────────────────────────────────────────────────────────────────────────────

/// The two faces the exporter renders with: normal body text and bold runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for the exported A4 document, all lengths in millimetres
/// measured from the top-left corner.
///
/// The two break-reset margins are deliberately asymmetric: an ordinary
/// overflow break resumes at `overflow_top_mm`, an answer-key forced break at
/// the slightly smaller `forced_break_top_mm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    /// Usable text width — lines wrap at this measure.
    pub content_width_mm: f32,
    pub line_height_mm: f32,
    pub body_size_pt: f32,
    pub title_size_pt: f32,
    /// Baseline of the document title on the first page.
    pub title_y_mm: f32,
    /// First body line on the first page (below the title).
    pub first_page_top_mm: f32,
    /// A line whose cursor passes this threshold moves to a new page.
    pub page_bottom_mm: f32,
    /// Cursor reset after an ordinary overflow break.
    pub overflow_top_mm: f32,
    /// Cursor reset after an answer-key forced break.
    pub forced_break_top_mm: f32,
}

/// Returns the default page config: A4, 15 mm left margin, 180 mm measure,
/// 12 pt body at an 8 mm line pitch, 270 mm bottom threshold.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_left_mm: 15.0,
        content_width_mm: 180.0,
        line_height_mm: 8.0,
        body_size_pt: 12.0,
        title_size_pt: 18.0,
        title_y_mm: 20.0,
        first_page_top_mm: 30.0,
        page_bottom_mm: 270.0,
        overflow_top_mm: 20.0,
        forced_break_top_mm: 15.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font face.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~).
pub struct FontMetricTable {
    pub face: FontFace,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures the rendered width of a string in millimetres at `size_pt`.
    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * PT_TO_MM
    }

    /// Width of one space in millimetres at `size_pt`.
    pub fn space_mm(&self, size_pt: f32) -> f32 {
        self.space_width * size_pt * PT_TO_MM
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica regular — body text.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.28, 0.28, 0.36, 0.56, 0.56, 0.89, 0.67, 0.19, 0.33, 0.33, 0.39, 0.58, 0.28, 0.33, 0.28, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.58, 0.58, 0.58, 0.56, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.67, 0.72, 0.72, 0.67, 0.61, 0.78, 0.72, 0.28, 0.50, 0.67, 0.56, 0.83,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.78, 0.67, 0.78, 0.72, 0.67, 0.61, 0.72, 0.67, 0.94, 0.67, 0.67, 0.61,
        // [     \     ]     ^     _     `
        0.28, 0.28, 0.28, 0.47, 0.56, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.28, 0.56, 0.56, 0.22, 0.22, 0.50, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.50, 0.28, 0.56, 0.50, 0.72, 0.50, 0.50, 0.50,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.58,
    ],
    average_char_width: 0.53,
    space_width: 0.28,
};

/// Helvetica bold — emphasized runs. Slightly wider than the regular face.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.28, 0.33, 0.47, 0.56, 0.56, 0.89, 0.72, 0.24, 0.33, 0.33, 0.39, 0.58, 0.28, 0.33, 0.28, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.33, 0.33, 0.58, 0.58, 0.58, 0.61, 0.98,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.72, 0.72, 0.72, 0.72, 0.67, 0.61, 0.78, 0.72, 0.28, 0.56, 0.72, 0.61, 0.83,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.78, 0.67, 0.78, 0.72, 0.67, 0.61, 0.72, 0.67, 0.94, 0.67, 0.67, 0.61,
        // [     \     ]     ^     _     `
        0.33, 0.28, 0.33, 0.58, 0.56, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.61, 0.56, 0.61, 0.56, 0.33, 0.61, 0.61, 0.28, 0.28, 0.56, 0.28, 0.89,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.61, 0.61, 0.61, 0.61, 0.39, 0.56, 0.33, 0.61, 0.56, 0.78, 0.56, 0.56, 0.50,
        // {     |     }     ~
        0.39, 0.28, 0.39, 0.58,
    ],
    average_char_width: 0.56,
    space_width: 0.28,
};

/// Returns the static metric table for a given font face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(FontFace::Helvetica);
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.28).abs() < 1e-4,
            "space width should be 0.28, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFace::Helvetica);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_bold_face_measures_wider_for_lowercase_text() {
        let text = "learning objectives";
        let normal = get_metrics(FontFace::Helvetica).measure_str(text);
        let bold = get_metrics(FontFace::HelveticaBold).measure_str(text);
        assert!(
            bold > normal,
            "bold ({bold}) should be wider than normal ({normal})"
        );
    }

    #[test]
    fn test_measure_mm_scales_with_font_size() {
        let metrics = get_metrics(FontFace::Helvetica);
        let at_12 = metrics.measure_mm("Session", 12.0);
        let at_18 = metrics.measure_mm("Session", 18.0);
        assert!((at_18 / at_12 - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config();
        assert_eq!(config.content_width_mm, 180.0);
        assert_eq!(config.page_bottom_mm, 270.0);
        // The ordinary overflow reset sits lower on the page than the forced
        // answer-key reset.
        assert!(config.overflow_top_mm > config.forced_break_top_mm);
        assert!(config.first_page_top_mm > config.title_y_mm);
    }
}
