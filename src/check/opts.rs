use crate::check::wcag::WcagLevel;
use crate::foundation::error::{ContrastError, ContrastResult};

/// Tuning knobs for the contrast check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckOpts {
    pub(crate) overlap_ratio: f64,
    pub(crate) sample_stride: usize,
    pub(crate) palette_size: usize,
    pub(crate) px_per_pt: f64,
    pub(crate) level: WcagLevel,
    pub(crate) bold_large_text: bool,
    pub(crate) threads: Option<usize>,
}

impl Default for CheckOpts {
    fn default() -> Self {
        Self {
            overlap_ratio: 1.0 / 3.0,
            sample_stride: 10,
            palette_size: 5,
            px_per_pt: 1.333333,
            level: WcagLevel::AA,
            bold_large_text: false,
            threads: None,
        }
    }
}

impl CheckOpts {
    /// Fraction of the text box a background must cover to count as significant.
    pub fn with_overlap_ratio(mut self, ratio: f64) -> Self {
        self.overlap_ratio = ratio;
        self
    }

    /// Sample every `stride`-th pixel when extracting dominant colours.
    pub fn with_sample_stride(mut self, stride: usize) -> Self {
        self.sample_stride = stride;
        self
    }

    /// Number of palette boxes the median cut produces before picking the dominant one.
    pub fn with_palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }

    /// Editor pixels per typographic point.
    pub fn with_px_per_pt(mut self, px_per_pt: f64) -> Self {
        self.px_per_pt = px_per_pt;
        self
    }

    /// Conformance level to enforce.
    pub fn with_level(mut self, level: WcagLevel) -> Self {
        self.level = level;
        self
    }

    /// Also treat bold (`fontWeight >= 700`) text from 14pt as large.
    ///
    /// Off by default, where only the font size decides.
    pub fn with_bold_large_text(mut self, enabled: bool) -> Self {
        self.bold_large_text = enabled;
        self
    }

    /// Resolve backgrounds on a dedicated pool of `threads` workers instead of the global pool.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Enforced conformance level.
    pub fn level(&self) -> WcagLevel {
        self.level
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> ContrastResult<()> {
        if !(self.overlap_ratio > 0.0 && self.overlap_ratio <= 1.0) {
            return Err(ContrastError::validation(
                "overlap_ratio must be in (0, 1]",
            ));
        }
        if self.sample_stride == 0 {
            return Err(ContrastError::validation("sample_stride must be >= 1"));
        }
        if self.palette_size == 0 {
            return Err(ContrastError::validation("palette_size must be >= 1"));
        }
        if !self.px_per_pt.is_finite() || self.px_per_pt <= 0.0 {
            return Err(ContrastError::validation(
                "px_per_pt must be finite and > 0",
            ));
        }
        if self.threads == Some(0) {
            return Err(ContrastError::validation(
                "threads must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/check/opts.rs"]
mod tests;
