//! Session handling: token claims, token storage, logout and role routing.
//!
//! Nothing in this module verifies a token signature. Claims read here are
//! hints for display and routing; the backend remains the only authority on
//! what a session may do.

pub mod guard;
pub mod roles;
pub mod store;
pub mod token;

pub use guard::{is_expired, is_expired_at, History, NavigationHistory, Navigator, SessionCookies, SessionGuard};
pub use roles::{route_for, Role};
pub use store::{FileStorage, MemoryStorage, SessionStore, StorageArea};
pub use token::{decode, TokenClaims};
