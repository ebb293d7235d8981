//! Shared Error Types
//!
//! Error types used across the session, routing and storage modules.
//! Every variant carries enough context for a log line, and the errors
//! that reach a user also expose a `user_message()` with the wording the
//! dashboards show.
//!
//! # Error Categories
//!
//! - `DecodeError` - a session token could not be read
//! - `UnknownRoleError` - a role outside the known set was returned at login
//! - `StorageError` - a storage area could not be read or written
//!
//! Form validation failures are not errors in this sense. They are returned
//! as data in [`crate::validation::ValidationErrors`].
//!
//! # Usage
//!
//! ```rust
//! use lifebridge::shared::error::StorageError;
//!
//! let error = StorageError::unavailable("session", "storage disabled");
//! assert!(error.to_string().contains("session"));
//! ```
use thiserror::Error;

/// Failure to decode the payload segment of a session token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Token is missing or blank
    #[error("token is empty")]
    Empty,

    /// Token does not have exactly three dot-separated segments
    #[error("token has {found} segments, expected 3")]
    Segments {
        /// Number of segments actually found
        found: usize,
    },

    /// Payload segment is not valid base64url
    #[error("token payload is not base64url: {message}")]
    Base64 {
        /// Decoder message
        message: String,
    },

    /// Payload decoded but is not a JSON object of claims
    #[error("token payload is not a claims object: {message}")]
    Json {
        /// Parser message
        message: String,
    },
}

impl DecodeError {
    /// Create a new base64 error
    pub fn base64(message: impl Into<String>) -> Self {
        Self::Base64 {
            message: message.into(),
        }
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// Message shown to the user. A malformed token always reads as an
    /// expired session.
    pub fn user_message(&self) -> &'static str {
        "Session expired. Please login again."
    }
}

/// A role string that has no landing route.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {role:?}")]
pub struct UnknownRoleError {
    /// The role value as received, empty when none was supplied
    pub role: String,
}

impl UnknownRoleError {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }

    pub fn user_message(&self) -> &'static str {
        "Unknown role. Please contact support."
    }
}

/// Storage area failures. Callers treat these as best-effort and log them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Area is disabled or its lock is poisoned
    #[error("storage area '{area}' unavailable: {message}")]
    Unavailable {
        /// Name of the storage area
        area: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// Backing file could not be read or written
    #[error("storage area '{area}' I/O error: {source}")]
    Io {
        /// Name of the storage area
        area: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Backing file holds something other than a string map
    #[error("storage area '{area}' is corrupt: {source}")]
    Serialization {
        /// Name of the storage area
        area: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Create a new unavailable error
    pub fn unavailable(area: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            area,
            message: message.into(),
        }
    }

    pub fn io(area: &'static str, source: std::io::Error) -> Self {
        Self::Io { area, source }
    }

    pub fn serialization(area: &'static str, source: serde_json::Error) -> Self {
        Self::Serialization { area, source }
    }
}
