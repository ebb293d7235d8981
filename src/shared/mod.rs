//! Shared Module
//!
//! Configuration and error types used by every other module of the crate.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, StorageKind};
pub use error::{DecodeError, StorageError, UnknownRoleError};
