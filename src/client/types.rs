/**
 * Client Wire Types
 *
 * Request and response bodies exchanged with the hospital backend.
 * Field names follow the backend's camelCase JSON.
 */

use serde::{Deserialize, Serialize};

/// Login request body for `POST api/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Login response body. Both `token` and `role` are required for a login
/// to succeed, but either may be missing in a malformed response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Display name, only sent for doctors (e.g. "Dr. John Doe")
    #[serde(default)]
    pub doctor_name: Option<String>,
}

/// Error body the backend returns with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
