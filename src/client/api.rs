/**
 * Authenticated API Client
 *
 * An explicit HTTP client value for the hospital backend. Services receive
 * an `ApiClient` instead of reaching for a global instance.
 *
 * # Hooks
 *
 * - `RequestDecorator` - runs on every outgoing request (`BearerAuth`
 *   attaches the session token)
 * - `ResponseInterceptor` - sees every response status (`UnauthorizedLogout`
 *   ends the session on 401, except on exempt paths such as login)
 *
 * Requests carry JSON `Content-Type`/`Accept` headers and share one cookie
 * jar, so the server session cookie travels with them.
 */

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::client::types::ErrorBody;
use crate::session::guard::{Navigator, SessionCookies, SessionGuard};
use crate::session::store::SessionStore;
use crate::shared::config::AppConfig;
use crate::shared::error::StorageError;

/// API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 from the backend, with the body text it sent
    #[error("Unauthorized! Please log in again.")]
    Unauthorized { message: String },

    #[error("Request failed: {status} - {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message for the user: the server's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Unauthorized { message }
                if !message.is_empty() =>
            {
                message.clone()
            }
            ApiError::Unauthorized { .. } => "Unauthorized! Please log in again.".to_string(),
            _ => "Something went wrong. Please try again later.".to_string(),
        }
    }
}

/// `Authorization` header value for a token
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Runs on every outgoing request.
pub trait RequestDecorator: Send + Sync {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Sees the status of every response before the caller does.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, url: &Url, status: StatusCode);
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    store: SessionStore,
}

impl BearerAuth {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl RequestDecorator for BearerAuth {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.token() {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, bearer_header(&token)),
            None => request,
        }
    }
}

/// Logs the user out when the backend answers 401.
pub struct UnauthorizedLogout {
    guard: Arc<SessionGuard>,
    navigator: Arc<dyn Navigator>,
    exempt: Vec<String>,
}

impl UnauthorizedLogout {
    pub fn new(guard: Arc<SessionGuard>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            guard,
            navigator,
            exempt: Vec::new(),
        }
    }

    /// Leave the session alone when `path` answers 401. A 401 from the
    /// login endpoint means bad credentials, not an expired session.
    pub fn exempt(mut self, path: &str) -> Self {
        self.exempt.push(format!("/{}", path.trim_start_matches('/')));
        self
    }

    fn is_exempt(&self, url: &Url) -> bool {
        self.exempt.iter().any(|path| url.path().ends_with(path.as_str()))
    }
}

impl ResponseInterceptor for UnauthorizedLogout {
    fn on_response(&self, url: &Url, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED && !self.is_exempt(url) {
            tracing::warn!("Unauthorized! Please log in again.");
            self.guard.logout(self.navigator.as_ref());
        }
    }
}

/// The client's cookie jar, scoped to the backend origin.
#[derive(Debug, Clone)]
pub struct CookieJarHandle {
    jar: Arc<Jar>,
    url: Url,
}

impl CookieJarHandle {
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl SessionCookies for CookieJarHandle {
    fn expire(&self, name: &str) -> Result<(), StorageError> {
        let expired = format!("{name}=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/");
        self.jar.add_cookie_str(&expired, &self.url);
        Ok(())
    }
}

/// HTTP client for the hospital backend.
pub struct ApiClient {
    config: AppConfig,
    http: reqwest::Client,
    cookies: Arc<Jar>,
    decorators: Vec<Arc<dyn RequestDecorator>>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let cookies = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        Ok(Self {
            config,
            http,
            cookies,
            decorators: Vec::new(),
            interceptors: Vec::new(),
        })
    }

    pub fn with_decorator(mut self, decorator: Arc<dyn RequestDecorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cookie_jar(&self) -> Result<CookieJarHandle, ApiError> {
        let url = Url::parse(&self.config.api_base_url).map_err(|e| ApiError::InvalidUrl {
            url: self.config.api_base_url.clone(),
            message: e.to_string(),
        })?;
        Ok(CookieJarHandle {
            jar: Arc::clone(&self.cookies),
            url,
        })
    }

    /// A request to `path` under the base URL with every decorator applied.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.config.api_url(path));
        self.decorators
            .iter()
            .fold(request, |request, decorator| decorator.decorate(request))
    }

    /// Send a request, run the interceptors, and turn failures into errors.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        for interceptor in &self.interceptors {
            interceptor.on_response(response.url(), status);
        }

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::error_message(response).await;
        tracing::debug!(%status, "Request failed: {}", message);
        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized { message })
        } else {
            Err(ApiError::Status { status, message })
        }
    }

    /// `message` of a JSON error body, else the body text as sent.
    async fn error_message(response: Response) -> String {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| text.trim().to_string())
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::json(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::cookie::CookieStore;

    #[test]
    fn test_bearer_header() {
        assert_eq!(bearer_header("abc"), "Bearer abc");
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let error = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "Email already registered".to_string(),
        };
        assert_eq!(error.user_message(), "Email already registered");
        let error = ApiError::Unauthorized {
            message: "Invalid email or password.".to_string(),
        };
        assert_eq!(error.user_message(), "Invalid email or password.");
        let error = ApiError::Unauthorized {
            message: String::new(),
        };
        assert_eq!(error.user_message(), "Unauthorized! Please log in again.");
        assert_eq!(
            ApiError::Decode("eof".to_string()).user_message(),
            "Something went wrong. Please try again later."
        );
    }

    #[test]
    fn test_request_uses_base_url() {
        let client = ApiClient::new(AppConfig::default()).unwrap();
        let request = client.request(Method::GET, "api/doctors").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/hospital/api/doctors"
        );
    }

    #[test]
    fn test_bearer_auth_only_with_token() {
        let store = SessionStore::in_memory();
        let client = ApiClient::new(AppConfig::default())
            .unwrap()
            .with_decorator(Arc::new(BearerAuth::new(store.clone())));

        let request = client.request(Method::GET, "api/me").build().unwrap();
        assert!(request.headers().get("authorization").is_none());

        store.set_token("abc").unwrap();
        let request = client.request(Method::GET, "api/me").build().unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer abc");
    }

    #[test]
    fn test_unauthorized_logout_skips_exempt_path() {
        let store = SessionStore::in_memory();
        store.set_token("abc").unwrap();
        let guard = Arc::new(SessionGuard::new(&AppConfig::default(), store.clone()));
        let navigations = Arc::new(std::sync::Mutex::new(0));
        let counter = Arc::clone(&navigations);
        let logout = UnauthorizedLogout::new(
            guard,
            Arc::new(move |_: &str| *counter.lock().unwrap() += 1),
        )
        .exempt("api/login");

        let login = Url::parse("http://localhost:8080/hospital/api/login").unwrap();
        logout.on_response(&login, StatusCode::UNAUTHORIZED);
        assert_eq!(store.token(), Some("abc".to_string()));
        assert_eq!(*navigations.lock().unwrap(), 0);

        let other = Url::parse("http://localhost:8080/hospital/api/appointments").unwrap();
        logout.on_response(&other, StatusCode::OK);
        assert_eq!(store.token(), Some("abc".to_string()));
        logout.on_response(&other, StatusCode::UNAUTHORIZED);
        assert_eq!(store.token(), None);
        assert_eq!(*navigations.lock().unwrap(), 1);
    }

    #[test]
    fn test_cookie_jar_expire() {
        let client = ApiClient::new(AppConfig::default()).unwrap();
        let handle = client.cookie_jar().unwrap();
        handle
            .jar()
            .add_cookie_str("JSESSIONID=abc123; Path=/", handle.url());
        assert!(handle.jar().cookies(handle.url()).is_some());

        handle.expire("JSESSIONID").unwrap();
        assert!(handle.jar().cookies(handle.url()).is_none());
    }
}
