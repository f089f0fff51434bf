use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{ContrastError, ContrastResult};

/// Source of decoded media for image backgrounds.
///
/// Implementations are shared across the parallel background resolutions of a page, so they must
/// be `Send + Sync`.
pub trait MediaLoader: Send + Sync {
    /// Load and decode the media referenced by a resource `src`.
    fn load(&self, src: &str) -> ContrastResult<Arc<PreparedImage>>;
}

/// Normalize and validate a media path relative to a loader root.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ContrastResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ContrastError::validation("media paths must be relative"));
    }
    if s.is_empty() {
        return Err(ContrastError::validation("media path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ContrastError::validation("media paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ContrastError::validation("media path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Map a resource `src` onto a path relative to a local mirror.
///
/// Remote URLs keep their path (`https://host/uploads/a.jpg` -> `uploads/a.jpg`); query strings and
/// fragments are dropped.
pub fn media_rel_path(src: &str) -> ContrastResult<String> {
    let without_query = src.split(['?', '#']).next().unwrap_or_default();
    let local = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or_default(),
        None => without_query,
    };
    normalize_rel_path(local)
}

/// Loads media from a local directory.
///
/// Every call reads and decodes from disk; nothing is cached between resolutions.
#[derive(Clone, Debug)]
pub struct FsMediaLoader {
    root: PathBuf,
}

impl FsMediaLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory media paths are resolved against.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl MediaLoader for FsMediaLoader {
    fn load(&self, src: &str) -> ContrastResult<Arc<PreparedImage>> {
        let rel = media_rel_path(src)?;
        let path = self.root.join(&rel);
        let bytes = std::fs::read(&path).map_err(|e| {
            ContrastError::media(format!("read media '{}': {e}", path.display()))
        })?;
        let image = decode_image(&bytes)
            .map_err(|e| ContrastError::media(format!("decode media '{rel}': {e}")))?;
        Ok(Arc::new(image))
    }
}

/// Media held in memory, keyed by resource `src`.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMediaLoader {
    images: HashMap<String, Arc<PreparedImage>>,
}

impl InMemoryMediaLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `src`, replacing any previous entry.
    pub fn insert(&mut self, src: impl Into<String>, image: PreparedImage) {
        self.images.insert(src.into(), Arc::new(image));
    }

    /// Builder-style [`InMemoryMediaLoader::insert`].
    pub fn with_image(mut self, src: impl Into<String>, image: PreparedImage) -> Self {
        self.insert(src, image);
        self
    }
}

impl MediaLoader for InMemoryMediaLoader {
    fn load(&self, src: &str) -> ContrastResult<Arc<PreparedImage>> {
        self.images
            .get(src)
            .cloned()
            .ok_or_else(|| ContrastError::media(format!("no media registered for '{src}'")))
    }
}

/// Loader that never resolves anything; every image background is "no signal".
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMediaLoader;

impl MediaLoader for NoMediaLoader {
    fn load(&self, src: &str) -> ContrastResult<Arc<PreparedImage>> {
        Err(ContrastError::media(format!(
            "media loading disabled (requested '{src}')"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
