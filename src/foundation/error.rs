/// Convenience result type used across the checker.
pub type ContrastResult<T> = Result<T, ContrastError>;

/// Top-level error taxonomy used by checker APIs.
#[derive(thiserror::Error, Debug)]
pub enum ContrastError {
    /// Invalid options or page data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Media could not be located, read, or decoded.
    #[error("media error: {0}")]
    Media(String),

    /// A background colour could not be derived from otherwise valid media.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Errors when serializing or deserializing story data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ContrastError {
    /// Build a [`ContrastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ContrastError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`ContrastError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`ContrastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ContrastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
