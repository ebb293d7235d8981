/**
 * Session Guard
 *
 * Decides whether a stored token still represents a live session and tears
 * the session down on logout.
 *
 * # Logout
 *
 * 1. Clear every registered storage area (each clear is best-effort)
 * 2. Expire the session cookie
 * 3. Push a history entry and block back navigation
 * 4. Navigate to the login route
 *
 * Navigation always comes last, so anything reacting to it sees a fully
 * cleared session.
 */

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::session::store::{FileStorage, SessionStore, StorageArea};
use crate::session::token::{self, TokenClaims};
use crate::shared::config::AppConfig;
use crate::shared::error::StorageError;

/// Receives the route to show after logout.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, route: &str) {
        self(route)
    }
}

/// Browser-style history the guard can lock after logout.
pub trait History: Send + Sync {
    /// Push a duplicate of the current entry
    fn push_current(&self);

    /// Make "back" stay on the current entry
    fn block_back(&self);
}

/// Cookies the guard can expire by name.
pub trait SessionCookies: Send + Sync {
    fn expire(&self, name: &str) -> Result<(), StorageError>;
}

/// In-memory navigation history.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    state: Mutex<HistoryState>,
}

#[derive(Debug, Default)]
struct HistoryState {
    entries: Vec<String>,
    back_blocked: bool,
}

impl NavigationHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![initial.into()],
                back_blocked: false,
            }),
        }
    }

    pub fn push(&self, route: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.push(route.into());
        }
    }

    /// Go back one entry and return the route now shown. A blocked history
    /// stays where it is.
    pub fn back(&self) -> Option<String> {
        let mut state = self.state.lock().ok()?;
        if !state.back_blocked && state.entries.len() > 1 {
            state.entries.pop();
        }
        state.entries.last().cloned()
    }

    pub fn current(&self) -> Option<String> {
        self.state.lock().ok()?.entries.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl History for NavigationHistory {
    fn push_current(&self) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(current) = state.entries.last().cloned() {
                state.entries.push(current);
            }
        }
    }

    fn block_back(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.back_blocked = true;
        }
    }
}

/// True if `token` cannot be decoded, has no `exp`, or `exp` is before now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

/// [`is_expired`] against an explicit clock, in Unix seconds.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match token::decode(token) {
        Ok(TokenClaims { exp: Some(exp), .. }) => exp < now,
        Ok(_) => {
            tracing::debug!("Token has no exp claim");
            true
        }
        Err(e) => {
            tracing::debug!("Token rejected: {}", e);
            true
        }
    }
}

/// Session checks and logout over a [`SessionStore`].
pub struct SessionGuard {
    store: SessionStore,
    areas: Vec<Arc<dyn StorageArea>>,
    cookies: Option<Arc<dyn SessionCookies>>,
    history: Option<Arc<dyn History>>,
    cookie_name: String,
    login_route: String,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("store", &self.store)
            .field(
                "areas",
                &self.areas.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .field("cookie_name", &self.cookie_name)
            .field("login_route", &self.login_route)
            .finish()
    }
}

impl SessionGuard {
    /// Guard over `store`. The store's own area is always cleared on logout.
    pub fn new(config: &AppConfig, store: SessionStore) -> Self {
        let areas = vec![store.area()];
        Self {
            store,
            areas,
            cookies: None,
            history: None,
            cookie_name: config.session_cookie.clone(),
            login_route: config.login_route.clone(),
        }
    }

    /// Guard over `store` that also clears the persistent file area on
    /// logout, so a token left by a run with `storage = "persistent"` does
    /// not outlive the session. Without a data directory only the store's
    /// own area is registered.
    pub fn from_config(config: &AppConfig, store: SessionStore) -> Self {
        let guard = Self::new(config, store);
        if guard.store.area().name() == FileStorage::NAME {
            return guard;
        }
        match FileStorage::from_config(config) {
            Ok(file) => guard.with_area(Arc::new(file)),
            Err(e) => {
                tracing::debug!("No persistent area to clear on logout: {}", e);
                guard
            }
        }
    }

    /// Also clear `area` on logout.
    pub fn with_area(mut self, area: Arc<dyn StorageArea>) -> Self {
        if !self.areas.iter().any(|a| Arc::ptr_eq(a, &area)) {
            self.areas.push(area);
        }
        self
    }

    pub fn with_cookies(mut self, cookies: Arc<dyn SessionCookies>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    pub fn with_history(mut self, history: Arc<dyn History>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn is_expired(&self, token: &str) -> bool {
        is_expired(token)
    }

    pub fn current_token(&self) -> Option<String> {
        self.store.token()
    }

    /// Claims of the stored token, for display and routing only.
    pub fn current_claims(&self) -> Option<TokenClaims> {
        let token = self.current_token()?;
        token::decode(&token)
            .map_err(|e| tracing::debug!("Stored token rejected: {}", e))
            .ok()
    }

    pub fn current_role(&self) -> Option<String> {
        self.current_claims()?.role
    }

    /// Login email of the stored session, used to pre-fill forms.
    pub fn current_subject(&self) -> Option<String> {
        self.current_claims()?.subject
    }

    /// A token is stored and has not expired.
    pub fn is_authenticated(&self) -> bool {
        self.current_token()
            .map(|token| !is_expired(&token))
            .unwrap_or(false)
    }

    pub fn store_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set_token(token)
    }

    /// Clear all session state, then send the user to the login route.
    ///
    /// Never fails: storage or cookie errors are logged and the remaining
    /// steps still run. Safe to call repeatedly.
    pub fn logout(&self, navigator: &dyn Navigator) {
        for area in &self.areas {
            if let Err(e) = area.clear() {
                tracing::warn!(area = area.name(), "Failed to clear storage on logout: {}", e);
            }
        }

        if let Some(cookies) = &self.cookies {
            if let Err(e) = cookies.expire(&self.cookie_name) {
                tracing::warn!(cookie = %self.cookie_name, "Failed to expire cookie: {}", e);
            }
        }

        if let Some(history) = &self.history {
            history.push_current();
            history.block_back();
        }

        tracing::info!("Session cleared, navigating to {}", self.login_route);
        navigator.navigate(&self.login_route);
    }
}
