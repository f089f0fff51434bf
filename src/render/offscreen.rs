use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{ContrastError, ContrastResult};
use crate::render::placement::MediaPlacement;
use crate::story::model::Flip;

/// Largest sample window rasterized for one resolution.
pub const MAX_WINDOW_PIXELS: u64 = 4096 * 4096;

/// How media is painted onto its offscreen canvas.
///
/// The canvas is `placement.width x placement.height`. Media fills it edge to edge, is mirrored
/// inside it when flipped, and is rotated about the centre of the visible frame.
#[derive(Clone, Copy, Debug)]
pub struct CanvasPaint {
    /// Media size and crop offset.
    pub placement: MediaPlacement,
    /// Size of the element frame the media is cropped to.
    pub frame_size: (f64, f64),
    /// Clockwise rotation in degrees; `None` for page backgrounds.
    pub rotation_deg: Option<f64>,
    /// Mirroring.
    pub flip: Flip,
}

impl CanvasPaint {
    /// Canvas-sized media space -> canvas space.
    pub fn transform(&self) -> Affine {
        let p = self.placement;
        let mut flip = Affine::IDENTITY;
        if self.flip.any() {
            let sx = if self.flip.horizontal { -1.0 } else { 1.0 };
            let sy = if self.flip.vertical { -1.0 } else { 1.0 };
            let tx = if self.flip.horizontal { p.width } else { 0.0 };
            let ty = if self.flip.vertical { p.height } else { 0.0 };
            flip = Affine::translate(Vec2::new(tx, ty)) * Affine::scale_non_uniform(sx, sy);
        }

        match self.rotation_deg {
            Some(deg) if deg != 0.0 => {
                let pivot = Point::new(
                    p.offset_x + self.frame_size.0 / 2.0,
                    p.offset_y + self.frame_size.1 / 2.0,
                );
                Affine::rotate_about(deg.to_radians(), pivot) * flip
            }
            _ => flip,
        }
    }

    /// Rasterize the `window` region of the canvas into a fresh straight-alpha buffer.
    ///
    /// Only the window is allocated, and windows above [`MAX_WINDOW_PIXELS`] are refused. Pixels
    /// outside the canvas or outside the painted media are left transparent. Media is sampled
    /// nearest-neighbour.
    pub fn render_window(
        &self,
        media: &PreparedImage,
        window: Rect,
    ) -> ContrastResult<image::RgbaImage> {
        let w = window.width().round();
        let h = window.height().round();
        if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
            return Err(ContrastError::resolution(format!(
                "sample window {w}x{h} is empty"
            )));
        }
        if w * h > MAX_WINDOW_PIXELS as f64 || w > f64::from(u16::MAX) || h > f64::from(u16::MAX)
        {
            return Err(ContrastError::resolution(format!(
                "sample window {w}x{h} exceeds the {MAX_WINDOW_PIXELS} pixel budget"
            )));
        }
        if media.width() == 0 || media.height() == 0 {
            return Err(ContrastError::resolution("media has no pixels"));
        }
        let (ww, wh) = (w as u16, h as u16);

        let paint = media_paint(media)?;
        let (cw, ch) = (self.placement.width, self.placement.height);
        // Media pixels -> canvas-sized media space -> canvas -> window.
        let to_canvas = Affine::scale_non_uniform(
            cw / f64::from(media.width()),
            ch / f64::from(media.height()),
        );
        let origin = Vec2::new(window.x0.floor(), window.y0.floor());
        let tr = Affine::translate(-origin) * self.transform() * to_canvas;

        let mut ctx = vello_cpu::RenderContext::new(ww, wh);
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(media.width()),
            f64::from(media.height()),
        ));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(ww, wh);
        ctx.render_to_pixmap(&mut pixmap);

        let mut bytes = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        image::RgbaImage::from_raw(u32::from(ww), u32::from(wh), bytes)
            .ok_or_else(|| ContrastError::resolution("window pixmap byte len mismatch"))
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Premultiply `media` into a nearest-neighbour image paint.
fn media_paint(media: &PreparedImage) -> ContrastResult<vello_cpu::Image> {
    let w: u16 = media
        .width()
        .try_into()
        .map_err(|_| ContrastError::resolution("media width exceeds u16"))?;
    let h: u16 = media
        .height()
        .try_into()
        .map_err(|_| ContrastError::resolution("media height exceeds u16"))?;

    let pixels = media
        .rgba8()
        .chunks_exact(4)
        .map(|px| {
            let a = u16::from(px[3]);
            let mul = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([
                mul(px[0]),
                mul(px[1]),
                mul(px[2]),
                px[3],
            ])
        })
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);

    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler {
            quality: vello_cpu::peniko::ImageQuality::Low,
            ..vello_cpu::peniko::ImageSampler::default()
        },
    })
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/offscreen.rs"]
mod tests;
