//! LifeBridge - Hospital Client Core
//!
//! The client-side rules of the LifeBridge hospital dashboards: form
//! validation, the session token lifecycle, role routing, and the
//! authenticated HTTP client the dashboards talk to the backend through.
//!
//! # Module Structure
//!
//! - **`validation`** - declarative field rules and the patient, doctor,
//!   feedback and login forms
//! - **`session`** - token decoding, token storage, expiry checks, logout,
//!   and the role to landing route table
//! - **`client`** - `ApiClient` and the login flow
//! - **`shared`** - configuration and error types
//! - **`logging`** - `tracing` subscriber setup
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lifebridge::client::{AuthService, LoginRequest};
//! use lifebridge::session::SessionStore;
//! use lifebridge::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let store = SessionStore::from_config(&config)?;
//! let auth = AuthService::connect(config, store, Arc::new(|route: &str| {
//!     println!("navigate to {route}");
//! }))?;
//!
//! match auth.login(&LoginRequest::new("doctor@hospital.com", "secret1")).await {
//!     Ok(session) => println!("landing on {}", session.route),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Storage areas, the guard and the client are `Send + Sync` and shared
//! through `Arc`. Storage operations are synchronous; only HTTP calls are
//! async.
//!
//! # Trust
//!
//! Tokens are decoded without signature verification. Claims read on the
//! client pick a landing page and pre-fill forms; the backend authorises
//! every request.

/// Configuration and error types
pub mod shared;

/// Form validation
pub mod validation;

/// Session token lifecycle and role routing
pub mod session;

/// Backend HTTP client and login flow
pub mod client;

/// Logging setup
pub mod logging;
