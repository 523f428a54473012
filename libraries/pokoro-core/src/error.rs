/// Core error types for Pokoro
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `PokoroError`
pub type Result<T> = std::result::Result<T, PokoroError>;

/// Core error type for Pokoro
#[derive(Error, Debug)]
pub enum PokoroError {
    /// Track catalog could not be fetched
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Favorites store rejected or failed a request
    #[error("Favorites error: {0}")]
    Favorites(String),

    /// User identity could not be resolved or persisted
    #[error("Identity error: {0}")]
    Identity(String),

    /// Track not found in the current catalog
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl PokoroError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a favorites error
    pub fn favorites(msg: impl Into<String>) -> Self {
        Self::Favorites(msg.into())
    }

    /// Create an identity error
    pub fn identity(msg: impl Into<String>) -> Self {
        Self::Identity(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
