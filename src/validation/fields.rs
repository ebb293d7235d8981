//! Field validators
//!
//! Stateless checks for a single field value. Each check returns `Ok(())`
//! or the message shown next to the field.

use std::sync::LazyLock;

use regex::Regex;

use super::engine::FieldSet;

// Unanchored: "x a@b.c" matches.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

// Login form: the whole value, no spaces or extra `@`.
static STRICT_EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// `\d` would admit non-ASCII digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Characters that satisfy the special-character rule of a strong password.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

/// Minimum length of a strong password, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const EMAIL_INVALID: &str = "Email is invalid";
pub const STRICT_EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const PHONE_INVALID: &str = "Phone number must be 10 digits";
pub const PASSWORD_WEAK: &str = "Password must be at least 8 characters long, contain one uppercase letter, one lowercase letter, one number, and one special character";

/// A single rule applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Non-empty after trimming
    Required(&'static str),
    /// `<non-space>@<non-space>.<non-space>`
    Email,
    /// `<local>@<domain>.<tld>` over the whole value, no whitespace
    StrictEmail,
    /// Exactly ten ASCII digits
    Phone,
    /// Length, lower, upper, digit and special character
    StrongPassword,
    /// At least `n` characters
    MinLength(usize, &'static str),
    /// A number greater than zero
    PositiveNumber(&'static str),
}

impl Check {
    /// Run the check against one field of `fields`.
    pub(crate) fn run(&self, fields: &FieldSet, name: &str) -> Result<(), &'static str> {
        let raw = fields.text(name);
        let trimmed = raw.trim();
        match *self {
            Check::Required(message) => required(trimmed, message),
            Check::Email => email(trimmed),
            Check::StrictEmail => strict_email(trimmed),
            Check::Phone => phone(trimmed),
            Check::StrongPassword => strong_password(raw),
            Check::MinLength(min, message) => min_length(raw, min, message),
            Check::PositiveNumber(message) => positive_number(fields.number(name), message),
        }
    }
}

pub fn required(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), &'static str> {
    if EMAIL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(EMAIL_INVALID)
    }
}

pub fn strict_email(value: &str) -> Result<(), &'static str> {
    if STRICT_EMAIL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(STRICT_EMAIL_INVALID)
    }
}

pub fn phone(value: &str) -> Result<(), &'static str> {
    if PHONE_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(PHONE_INVALID)
    }
}

/// Password strength. Checked on the raw value; surrounding whitespace
/// counts toward the length like any other character.
pub fn strong_password(value: &str) -> Result<(), &'static str> {
    let long_enough = value.chars().count() >= PASSWORD_MIN_LENGTH;
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());
    let special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if long_enough && lower && upper && digit && special {
        Ok(())
    } else {
        Err(PASSWORD_WEAK)
    }
}

pub fn min_length(value: &str, min: usize, message: &'static str) -> Result<(), &'static str> {
    if value.chars().count() >= min {
        Ok(())
    } else {
        Err(message)
    }
}

pub fn positive_number(value: Option<f64>, message: &'static str) -> Result<(), &'static str> {
    match value {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(message),
    }
}
