use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{ContrastError, ContrastResult};

/// Decoded raster media in straight RGBA8 form.
///
/// The buffer always holds exactly `width * height * 4` bytes.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap a raw straight RGBA8 buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> ContrastResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        if expected != Some(rgba8.len()) {
            return Err(ContrastError::media(format!(
                "rgba8 buffer has {} bytes, expected {width}x{height}x4",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Wrap an already decoded buffer.
    pub fn from_rgba(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8: Arc::new(img.into_raw()),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes in row-major straight RGBA8.
    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }
}

/// Decode any format the `image` crate understands.
pub fn decode_image(bytes: &[u8]) -> ContrastResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PreparedImage::from_rgba(dyn_img.to_rgba8()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
