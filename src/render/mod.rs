//! Offscreen media rendering and colour sampling.
//!
//! Image backgrounds are drawn the way the editor draws them (cover crop, focal offset, rotation,
//! flip), but only the window under a text box is rasterized before the dominant colour is taken.

pub(crate) mod dominant;
pub(crate) mod offscreen;
pub(crate) mod placement;
