use crate::foundation::error::{ContrastError, ContrastResult};
use crate::story::model::MediaProps;

/// Size and crop offset of media drawn into an element frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaPlacement {
    /// Drawn media width after cover-fit and zoom.
    pub width: f64,
    /// Drawn media height after cover-fit and zoom.
    pub height: f64,
    /// Horizontal distance from the media's left edge to the frame's left edge.
    pub offset_x: f64,
    /// Vertical distance from the media's top edge to the frame's top edge.
    pub offset_y: f64,
}

/// Cover-fit `media` into a `box_width x box_height` frame, then apply zoom and focal point.
///
/// Zoom below 100% is clamped to 100% so the frame is always covered; the focal offset is clamped
/// so the frame never leaves the media.
pub fn media_placement(
    media: &MediaProps,
    box_width: f64,
    box_height: f64,
) -> ContrastResult<MediaPlacement> {
    let (rw, rh) = (media.resource.width, media.resource.height);
    if !(rw.is_finite() && rh.is_finite()) || rw <= 0.0 || rh <= 0.0 {
        return Err(ContrastError::resolution(format!(
            "media '{}' has invalid intrinsic size {rw}x{rh}",
            media.resource.src
        )));
    }
    if box_width <= 0.0 || box_height <= 0.0 {
        return Err(ContrastError::resolution("media frame has zero area"));
    }

    let scale = media.scale.unwrap_or(100.0).max(100.0);
    let focal_x = media.focal_x.unwrap_or(50.0);
    let focal_y = media.focal_y.unwrap_or(50.0);

    let (fit_w, fit_h) = if box_width / box_height > rw / rh {
        (box_width, box_width * rh / rw)
    } else {
        (box_height * rw / rh, box_height)
    };
    let width = fit_w * scale / 100.0;
    let height = fit_h * scale / 100.0;

    Ok(MediaPlacement {
        width,
        height,
        offset_x: focal_offset(width, box_width, focal_x),
        offset_y: focal_offset(height, box_height, focal_y),
    })
}

fn focal_offset(media_len: f64, box_len: f64, focal_pct: f64) -> f64 {
    (media_len * focal_pct / 100.0 - box_len / 2.0)
        .min(media_len - box_len)
        .max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/placement.rs"]
mod tests;
