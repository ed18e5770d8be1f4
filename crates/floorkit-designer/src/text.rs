//! Text metrics for table labels.
//!
//! Labels are measured against the bundled DejaVu Sans Bold face so layout
//! is identical on every machine regardless of installed fonts.

use floorkit_core::Size;
use rusttype::{point, Font, Scale};
use std::sync::OnceLock;

static LABEL_FONT_DATA: &[u8] = include_bytes!("../assets/fonts/dejavu/DejaVuSans-Bold.ttf");

/// Average glyph advance as a fraction of the font size, used only if the
/// bundled face cannot be parsed.
const FALLBACK_ADVANCE_RATIO: f64 = 0.6;
const FALLBACK_LINE_HEIGHT_RATIO: f64 = 1.2;

fn label_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = Font::try_from_bytes(LABEL_FONT_DATA);
        if font.is_none() {
            tracing::warn!("Bundled label font is invalid, using approximate metrics");
        }
        font
    })
    .as_ref()
}

/// Measured box of `text` set at `font_size`.
///
/// Width is the laid-out advance of the glyph run (kerning included);
/// height is the line box from ascent to descent.
pub fn measure(text: &str, font_size: f64) -> Size {
    let Some(font) = label_font() else {
        let glyphs = text.chars().count() as f64;
        return Size::new(
            glyphs * font_size * FALLBACK_ADVANCE_RATIO,
            font_size * FALLBACK_LINE_HEIGHT_RATIO,
        );
    };

    let scale = Scale::uniform(font_size as f32);
    let v_metrics = font.v_metrics(scale);
    let width = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);

    Size::new(width as f64, (v_metrics.ascent - v_metrics.descent) as f64)
}
