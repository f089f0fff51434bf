//! Page geometry: data-space to editor-pixel conversion and element boxes.

pub(crate) mod boxes;
pub(crate) mod units;
