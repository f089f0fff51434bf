//! The low-contrast check itself.

pub(crate) mod backgrounds;
pub(crate) mod opts;
pub(crate) mod page;
pub(crate) mod resolve;
pub(crate) mod wcag;
