//! Text measurement for band layout without touching backend font metrics.

/// Approximate rendered width of `text` at `font_px`, using a mean glyph
/// aspect ratio. Close enough to pack legend blocks without clipping.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    let glyphs = text.chars().count() as f32;
    (glyphs * font_px as f32 * 0.60).ceil() as u32
}
