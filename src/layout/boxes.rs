use crate::foundation::core::{Affine, PageSize, Point, Rect};
use crate::layout::units::{data_to_editor_x, data_to_editor_y, full_bleed_offset};
use crate::story::model::Element;

/// Element frame in page pixels, before rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Clockwise rotation in degrees about the frame centre.
    pub rotation_deg: f64,
}

impl ElementBox {
    /// Resolve the pixel frame of `element` on a page of `page` size.
    ///
    /// Page backgrounds ignore their stored geometry and cover the full-bleed area, which extends
    /// above and below the safe zone.
    pub fn of(element: &Element, page: PageSize) -> Self {
        if element.is_background {
            let height = page.width / crate::layout::units::FULLBLEED_RATIO;
            return Self {
                x: 0.0,
                y: -full_bleed_offset(page.width),
                width: page.width,
                height,
                rotation_deg: 0.0,
            };
        }
        Self {
            x: data_to_editor_x(element.x, page.width),
            y: data_to_editor_y(element.y, page.height),
            width: data_to_editor_x(element.width, page.width),
            height: data_to_editor_y(element.height, page.height),
            rotation_deg: element.rotation_angle,
        }
    }

    /// Unrotated frame.
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Frame centre.
    pub fn center(self) -> Point {
        self.rect().center()
    }

    /// Axis-aligned bounds of the rotated frame.
    pub fn bound_rect(self) -> Rect {
        let rect = self.rect();
        if self.rotation_deg == 0.0 {
            return rect;
        }
        Affine::rotate_about(self.rotation_deg.to_radians(), rect.center()).transform_rect_bbox(rect)
    }
}

/// Area shared by two axis-aligned rectangles (0 when disjoint).
pub fn overlapping_area(a: Rect, b: Rect) -> f64 {
    let dx = a.x1.min(b.x1) - a.x0.max(b.x0);
    let dy = a.y1.min(b.y1) - a.y0.max(b.y0);
    if dx >= 0.0 && dy >= 0.0 { dx * dy } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/boxes.rs"]
mod tests;
