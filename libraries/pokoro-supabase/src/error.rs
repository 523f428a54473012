//! Error types for the Supabase backend.

use pokoro_core::PokoroError;
use thiserror::Error;

/// Errors that can occur when talking to the Supabase REST API.
#[derive(Error, Debug)]
pub enum SupabaseError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Supabase error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Anon key missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid project URL
    #[error("Invalid Supabase URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend is offline or unreachable
    #[error("Supabase unreachable: {0}")]
    Unreachable(String),
}

/// Result type for Supabase operations.
pub type Result<T> = std::result::Result<T, SupabaseError>;

impl SupabaseError {
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Unreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }

    /// Convert into the core error, tagging it with the store it came from
    pub(crate) fn into_core(self, wrap: fn(String) -> PokoroError) -> PokoroError {
        match self {
            Self::Unreachable(msg) => PokoroError::Network(msg),
            Self::Request(e) if e.is_connect() || e.is_timeout() => {
                PokoroError::Network(e.to_string())
            }
            other => wrap(other.to_string()),
        }
    }
}
