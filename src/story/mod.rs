//! Story document model as saved by the editor.

pub(crate) mod color;
pub(crate) mod model;
pub(crate) mod spans;
