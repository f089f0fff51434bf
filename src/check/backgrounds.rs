use crate::foundation::core::{PageSize, Rect};
use crate::layout::boxes::{ElementBox, overlapping_area};
use crate::story::model::Element;

fn is_significant(area: f64, text_area: f64, overlap_ratio: f64) -> bool {
    area >= overlap_ratio * text_area
}

/// Elements behind a text box that are visually significant for its contrast.
///
/// `behind` is in z-order (back to front). Candidates are walked front to back: each one is kept
/// when it covers at least `overlap_ratio` of the text box, and its overlap is then subtracted from
/// the still-unoccluded area. The walk stops once the unoccluded remainder is no longer
/// significant, so anything further back is hidden.
pub fn significant_backgrounds<'a>(
    text_bounds: Rect,
    behind: &'a [Element],
    page: PageSize,
    overlap_ratio: f64,
) -> Vec<&'a Element> {
    let text_area = text_bounds.area();
    let mut unoccluded = text_area;
    let mut out = Vec::new();
    for element in behind.iter().rev() {
        if !is_significant(unoccluded, text_area, overlap_ratio) {
            break;
        }
        let area = overlapping_area(text_bounds, ElementBox::of(element, page).bound_rect());
        if is_significant(area, text_area, overlap_ratio) {
            out.push(element);
        }
        unoccluded -= area;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/check/backgrounds.rs"]
mod tests;
