//! Role to landing route mapping.
//!
//! Roles only select a landing page. The backend enforces what each role
//! may do.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::UnknownRoleError;

/// Roles issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_PATIENT")]
    Patient,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_DOCTOR")]
    Doctor,
    #[serde(rename = "ROLE_NURSE")]
    Nurse,
    #[serde(rename = "ROLE_STAFF")]
    Staff,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Patient,
        Role::Admin,
        Role::Doctor,
        Role::Nurse,
        Role::Staff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "ROLE_PATIENT",
            Role::Admin => "ROLE_ADMIN",
            Role::Doctor => "ROLE_DOCTOR",
            Role::Nurse => "ROLE_NURSE",
            Role::Staff => "ROLE_STAFF",
        }
    }

    /// Landing route of the role's dashboard
    pub fn landing_route(self) -> &'static str {
        match self {
            Role::Patient => "/patient/profile",
            Role::Admin => "/admin/profile",
            Role::Doctor => "/doctor/profile",
            Role::Nurse => "/nurse/profile",
            Role::Staff => "/staff/profile",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    /// Exact match only: `role_doctor` and `" ROLE_DOCTOR"` are unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRoleError::new(s))
    }
}

/// Landing route for a role string as received from the backend.
///
/// There is no fallback route: a missing or unrecognised role is an error
/// the caller must show to the user.
pub fn route_for(role: Option<&str>) -> Result<&'static str, UnknownRoleError> {
    let role = role.unwrap_or_default();
    match role.parse::<Role>() {
        Ok(role) => Ok(role.landing_route()),
        Err(e) => {
            tracing::warn!(role = %role, "no landing route for role");
            Err(e)
        }
    }
}
