use crate::assets::store::MediaLoader;
use crate::check::opts::CheckOpts;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::ContrastResult;
use crate::layout::boxes::ElementBox;
use crate::render::dominant::dominant_color;
use crate::render::offscreen::CanvasPaint;
use crate::render::placement::media_placement;
use crate::story::model::{Element, ElementKind, MediaProps, Page};

/// How the colour behind a text box is obtained for one background element.
#[derive(Clone, Copy, Debug)]
pub enum BackgroundResolver<'a> {
    /// Flat fill known up front (`None` for gradients or missing fills).
    Fill(Option<Rgba8>),
    /// Dominant colour of the media region under the text.
    Image {
        /// The image element.
        element: &'a Element,
        /// Its media properties.
        media: &'a MediaProps,
    },
    /// Element type that never yields a comparable colour.
    Unsupported,
}

impl<'a> BackgroundResolver<'a> {
    /// Pick the resolver for `element` on `page`.
    ///
    /// Page backgrounds without media show the page fill instead of their own.
    pub fn for_element(element: &'a Element, page: &'a Page) -> Self {
        match &element.kind {
            ElementKind::Image(media) => Self::Image { element, media },
            ElementKind::Shape(shape) => {
                let pattern = if element.is_page_background() {
                    page.background_color.as_ref()
                } else {
                    shape.background_color.as_ref()
                };
                Self::Fill(pattern.and_then(|p| p.solid_color()))
            }
            ElementKind::Text(_) | ElementKind::Video(_) | ElementKind::Other => Self::Unsupported,
        }
    }

    /// Resolve the background colour behind `text_bounds`.
    ///
    /// `Ok(None)` means the background has no single comparable colour. Errors come only from the
    /// image pipeline; callers treat them as "no signal".
    pub fn resolve(
        &self,
        text_bounds: Rect,
        page: &Page,
        loader: &dyn MediaLoader,
        opts: &CheckOpts,
    ) -> ContrastResult<Option<Rgba8>> {
        match *self {
            Self::Fill(color) => Ok(color),
            Self::Unsupported => Ok(None),
            Self::Image { element, media } => {
                image_background_color(element, media, text_bounds, page, loader, opts).map(Some)
            }
        }
    }
}

/// Render the part of an image element that sits under `text_bounds` and sample its dominant
/// colour.
fn image_background_color(
    element: &Element,
    media: &MediaProps,
    text_bounds: Rect,
    page: &Page,
    loader: &dyn MediaLoader,
    opts: &CheckOpts,
) -> ContrastResult<Rgba8> {
    let bg_box = ElementBox::of(element, page.size());
    let placement = media_placement(media, bg_box.width, bg_box.height)?;

    let paint = CanvasPaint {
        placement,
        frame_size: (bg_box.width, bg_box.height),
        rotation_deg: (!element.is_background).then_some(bg_box.rotation_deg),
        flip: element.flip,
    };
    let x0 = placement.offset_x + text_bounds.x0 - bg_box.x;
    let y0 = placement.offset_y + text_bounds.y0 - bg_box.y;
    let window = Rect::new(
        x0,
        y0,
        x0 + text_bounds.width(),
        y0 + text_bounds.height(),
    );

    let image = loader.load(&media.resource.src)?;
    let region = paint.render_window(&image, window)?;
    dominant_color(&region, opts.sample_stride, opts.palette_size)
}

#[cfg(test)]
#[path = "../../tests/unit/check/resolve.rs"]
mod tests;
