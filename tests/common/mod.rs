//! Common test utilities and helpers
//!
//! - Token minting and credentials
//! - wiremock backend helpers
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod mock_server;

pub use auth_helpers::*;
pub use mock_server::*;
