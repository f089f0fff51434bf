//! Conversions between the story data space and page pixels.
//!
//! Element geometry is stored against a fixed `412 x 618` data page. The editor renders pages at
//! arbitrary pixel sizes, so every box is rescaled before any area or pixel math happens.

/// Width of the data-space page.
pub const PAGE_WIDTH: f64 = 412.0;
/// Height of the data-space page.
pub const PAGE_HEIGHT: f64 = 618.0;
/// Width / height of the safe-zone page.
pub const PAGE_RATIO: f64 = PAGE_WIDTH / PAGE_HEIGHT;
/// Width / height of the full-bleed area behind the safe zone.
pub const FULLBLEED_RATIO: f64 = 9.0 / 16.0;

/// Round to 5 decimal places, the precision the editor stores pixel values at.
pub fn editor_pixels(v: f64) -> f64 {
    (v * 100_000.0).round() / 100_000.0
}

/// Convert a horizontal data-space value to pixels on a page `page_width` wide.
pub fn data_to_editor_x(x: f64, page_width: f64) -> f64 {
    editor_pixels(x * page_width / PAGE_WIDTH)
}

/// Convert a vertical data-space value to pixels on a page `page_height` tall.
pub fn data_to_editor_y(y: f64, page_height: f64) -> f64 {
    editor_pixels(y * page_height / PAGE_HEIGHT)
}

/// Vertical distance between the top of the full-bleed area and the top of the safe zone.
pub fn full_bleed_offset(page_width: f64) -> f64 {
    (page_width / FULLBLEED_RATIO - page_width / PAGE_RATIO) / 2.0
}

/// Convert an editor font size in pixels to typographic points.
pub fn font_size_pt(font_size_px: f64, px_per_pt: f64) -> f64 {
    font_size_px / px_per_pt
}

#[cfg(test)]
#[path = "../../tests/unit/layout/units.rs"]
mod tests;
