//! Authentication test helpers
//!
//! Mints real HS256 tokens so decoding is exercised against what a Spring
//! backend would issue.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

/// Signing secret for test tokens. The client never checks it.
pub const TEST_SECRET: &[u8] = b"lifebridge-test-secret";

#[derive(Serialize)]
struct TestClaims<'a> {
    sub: &'a str,
    role: &'a str,
    iat: i64,
    exp: i64,
}

/// Test user credentials
pub struct TestUser {
    pub email: &'static str,
    pub password: &'static str,
    pub role: &'static str,
}

pub const DOCTOR: TestUser = TestUser {
    email: "doctor@lifebridge.test",
    password: "Doctor1!",
    role: "ROLE_DOCTOR",
};

pub const PATIENT: TestUser = TestUser {
    email: "patient@lifebridge.test",
    password: "Patient1!",
    role: "ROLE_PATIENT",
};

/// Token for `email`/`role` expiring `expires_in` from now
pub fn generate_test_token(email: &str, role: &str, expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = TestClaims {
        sub: email,
        role,
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET))
        .expect("Failed to generate test token")
}

/// Token valid for an hour
pub fn valid_token(user: &TestUser) -> String {
    generate_test_token(user.email, user.role, Duration::hours(1))
}

/// Token that expired an hour ago
pub fn expired_token(user: &TestUser) -> String {
    generate_test_token(user.email, user.role, Duration::hours(-1))
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
