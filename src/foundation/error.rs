/// Convenience result type used across imageset.
pub type ImagesetResult<T> = Result<T, ImagesetError>;

/// Top-level error taxonomy used by store and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum ImagesetError {
    /// Malformed logical identifier or unknown collection name.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Referenced asset does not exist in its collection.
    #[error("not found: {0}")]
    NotFound(String),

    /// Read, write, or delete failed at the storage layer.
    #[error("io failure: {0}")]
    Io(String),

    /// Generation backend unavailable or failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImagesetError {
    /// Build an [`ImagesetError::InvalidIdentifier`] value.
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    /// Build an [`ImagesetError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build an [`ImagesetError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build an [`ImagesetError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
