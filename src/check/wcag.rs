use crate::foundation::core::Rgba8;

/// WCAG conformance level a page is held to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WcagLevel {
    /// Minimum contrast (1.4.3).
    #[default]
    AA,
    /// Enhanced contrast (1.4.6).
    AAA,
}

impl WcagLevel {
    /// Minimum contrast ratio for normal or large text at this level.
    pub fn required_ratio(self, large_text: bool) -> f64 {
        match (self, large_text) {
            (Self::AA, false) => 4.5,
            (Self::AA, true) => 3.0,
            (Self::AAA, false) => 7.0,
            (Self::AAA, true) => 4.5,
        }
    }
}

/// Relative luminance of an sRGB colour (alpha ignored).
pub fn relative_luminance(color: Rgba8) -> f64 {
    fn linear(c: u8) -> f64 {
        let v = f64::from(c) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// Contrast ratio between two luminances, `1.0..=21.0`.
pub fn contrast_ratio_from_luminances(a: f64, b: f64) -> f64 {
    let (lighter, darker) = if a > b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two colours.
pub fn contrast_ratio(a: Rgba8, b: Rgba8) -> f64 {
    contrast_ratio_from_luminances(relative_luminance(a), relative_luminance(b))
}

/// WCAG "large scale" text: 18pt, or 14pt when bold.
pub fn is_large_text(font_size_pt: Option<f64>, font_weight: Option<u16>) -> bool {
    let Some(pt) = font_size_pt else {
        return false;
    };
    let bold = font_weight.is_some_and(|w| w >= 700);
    pt >= 18.0 || (bold && pt >= 14.0)
}

#[cfg(test)]
#[path = "../../tests/unit/check/wcag.rs"]
mod tests;
