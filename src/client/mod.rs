//! Backend client.
//!
//! - **`api`** - `ApiClient` with request decorators and response
//!   interceptors (bearer token, logout on 401)
//! - **`auth`** - `AuthService`, the login flow
//! - **`types`** - request and response bodies

pub mod api;
pub mod auth;
pub mod types;

pub use api::{
    bearer_header, ApiClient, ApiError, BearerAuth, CookieJarHandle, RequestDecorator,
    ResponseInterceptor, UnauthorizedLogout,
};
pub use auth::{AuthService, LoginError, LoginSuccess, LOGIN_PATH};
pub use types::{LoginRequest, LoginResponse};
