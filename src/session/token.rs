/**
 * Session Token Decoding
 *
 * Reads the claims carried in the payload segment of a session token.
 *
 * # Trust boundary
 *
 * The signature is NOT verified here. The backend signs and verifies tokens;
 * the client only reads claims to show the user's name, pick a landing
 * route, and decide when to ask for a fresh login. Decoded claims must never
 * be used as an access-control decision.
 */

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::error::DecodeError;

/// Claims read from a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Login email of the user
    #[serde(rename = "sub", default)]
    pub subject: Option<String>,
    /// Role identifier such as `ROLE_DOCTOR`
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration time (Unix timestamp, seconds)
    #[serde(default, deserialize_with = "exp_seconds")]
    pub exp: Option<i64>,
}

// NumericDate may carry a fractional part; whole seconds are kept.
fn exp_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let exp = Option::<f64>::deserialize(deserializer)?;
    Ok(exp.filter(|e| e.is_finite()).map(|e| e.floor() as i64))
}

/// Decode the payload segment of `token`.
///
/// # Errors
///
/// * `DecodeError::Empty` - token is blank
/// * `DecodeError::Segments` - token is not `header.payload.signature`
/// * `DecodeError::Base64` - payload is not base64url
/// * `DecodeError::Json` - payload is not a JSON object of claims
pub fn decode(token: &str) -> Result<TokenClaims, DecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Segments {
            found: segments.len(),
        });
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| DecodeError::base64(e.to_string()))?;

    let value: serde_json::Value =
        serde_json::from_slice(&payload).map_err(|e| DecodeError::json(e.to_string()))?;
    if !value.is_object() {
        return Err(DecodeError::json("expected a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| DecodeError::json(e.to_string()))
}
