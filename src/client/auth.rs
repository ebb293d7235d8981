/**
 * Login Flow
 *
 * Validates the login form, posts the credentials, checks what came back
 * and starts the session.
 *
 * # Steps
 *
 * 1. Validate email and password locally
 * 2. `POST api/login`
 * 3. Require both a token and a role in the response
 * 4. Reject a token that is already expired
 * 5. Store the token
 * 6. Resolve the role's landing route (an unknown role clears the token
 *    again)
 */

use std::sync::Arc;

use thiserror::Error;

use crate::client::api::{ApiClient, ApiError, BearerAuth, UnauthorizedLogout};
use crate::client::types::{LoginRequest, LoginResponse};
use crate::session::guard::{is_expired, Navigator, SessionGuard};
use crate::session::roles::{route_for, Role};
use crate::session::store::SessionStore;
use crate::session::token::{self, TokenClaims};
use crate::shared::config::AppConfig;
use crate::shared::error::{DecodeError, StorageError, UnknownRoleError};
use crate::validation::forms::LOGIN_FIELDS_MISSING;
use crate::validation::{FieldSet, FormKind, FormMode, ValidationErrors};

/// Login endpoint, relative to the API base URL
pub const LOGIN_PATH: &str = "api/login";

/// Login failures
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("login form is invalid")]
    Invalid(ValidationErrors),

    #[error("login request failed: {0}")]
    Request(#[from] ApiError),

    #[error("login response is missing a token or role")]
    MissingCredentials,

    #[error("token in login response is expired or unreadable")]
    SessionExpired,

    #[error(transparent)]
    UnknownRole(#[from] UnknownRoleError),

    #[error("failed to store session token: {0}")]
    Storage(#[from] StorageError),
}

impl LoginError {
    /// Message to show on the login page.
    pub fn user_message(&self) -> String {
        match self {
            // A missing field outranks a malformed one.
            LoginError::Invalid(errors) => errors
                .iter()
                .find(|(_, message)| *message == LOGIN_FIELDS_MISSING)
                .or_else(|| errors.iter().next())
                .map(|(_, message)| message.to_string())
                .unwrap_or_else(|| LOGIN_FIELDS_MISSING.to_string()),
            LoginError::Request(
                ApiError::Status { message, .. } | ApiError::Unauthorized { message },
            ) if !message.is_empty() => message.clone(),
            LoginError::Request(_) => {
                "Login failed. Please check your credentials and try again.".to_string()
            }
            LoginError::MissingCredentials => {
                "Invalid login credentials. Please try again.".to_string()
            }
            LoginError::SessionExpired => DecodeError::Empty.user_message().to_string(),
            LoginError::UnknownRole(e) => e.user_message().to_string(),
            LoginError::Storage(_) => {
                "Could not save your session. Please try again.".to_string()
            }
        }
    }
}

/// A started session.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSuccess {
    pub route: &'static str,
    pub role: Role,
    pub claims: TokenClaims,
    pub doctor_name: Option<String>,
}

/// Login and logout over an [`ApiClient`] and a [`SessionGuard`].
pub struct AuthService {
    api: Arc<ApiClient>,
    guard: Arc<SessionGuard>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, guard: Arc<SessionGuard>) -> Self {
        Self { api, guard }
    }

    /// Wire a client and guard that share `store`: requests carry the
    /// stored token, a 401 outside login logs out through `navigator`, and
    /// logout clears the persistent area and expires the client's session
    /// cookie as well as `store`.
    pub fn connect(
        config: AppConfig,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(config.clone())?;
        let cookies = Arc::new(api.cookie_jar()?);
        let guard = Arc::new(SessionGuard::from_config(&config, store).with_cookies(cookies));
        let logout = UnauthorizedLogout::new(Arc::clone(&guard), navigator).exempt(LOGIN_PATH);
        let api = api
            .with_decorator(Arc::new(BearerAuth::new(guard.store().clone())))
            .with_interceptor(Arc::new(logout));
        Ok(Self::new(Arc::new(api), guard))
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn guard(&self) -> &Arc<SessionGuard> {
        &self.guard
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginSuccess, LoginError> {
        let fields = FieldSet::new()
            .with("email", credentials.email.as_str())
            .with("password", credentials.password.as_str());
        let outcome = FormKind::Login.validate(&fields, FormMode::Create);
        if !outcome.is_valid() {
            return Err(LoginError::Invalid(outcome.into_errors()));
        }

        let request = LoginRequest::new(credentials.email.trim(), credentials.password.as_str());
        tracing::info!("Login request for {}", request.email);
        let response: LoginResponse = self.api.post_json(LOGIN_PATH, &request).await?;

        let (token, role) = match (response.token, response.role) {
            (Some(token), Some(role)) if !token.trim().is_empty() && !role.trim().is_empty() => {
                (token, role)
            }
            _ => {
                tracing::warn!("Login response missing token or role");
                return Err(LoginError::MissingCredentials);
            }
        };

        if is_expired(&token) {
            tracing::warn!("Login returned an expired token");
            return Err(LoginError::SessionExpired);
        }
        let claims = token::decode(&token).map_err(|_| LoginError::SessionExpired)?;

        self.guard.store_token(&token)?;

        let route = match route_for(Some(&role)) {
            Ok(route) => route,
            Err(e) => {
                if let Err(clear) = self.guard.store().clear_token() {
                    tracing::warn!("Failed to clear token after unknown role: {}", clear);
                }
                return Err(e.into());
            }
        };
        let role: Role = role.parse()?;

        tracing::info!(role = %role, "Login successful, redirecting to {}", route);
        Ok(LoginSuccess {
            route,
            role,
            claims,
            doctor_name: response.doctor_name,
        })
    }

    pub fn logout(&self, navigator: &dyn Navigator) {
        self.guard.logout(navigator);
    }
}
