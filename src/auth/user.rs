//! Account records as they are persisted by the user store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Matches the identifier input's `maxLength`.
pub const IDENTIFIER_MAX_LENGTH: usize = 12;

/// Account role, used after login or registration to pick a destination.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Citizen,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Admin => "admin",
        }
    }

    /// Area the UI navigates to once a session exists for this role.
    #[must_use]
    pub const fn destination(self) -> &'static str {
        match self {
            Self::Citizen => "/dashboard",
            Self::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "citizen" => Ok(Self::Citizen),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// One registered account.
///
/// The password is kept as entered; nothing here hashes it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "aadhaar")]
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl UserRecord {
    /// Exact comparison, no trimming or case folding.
    #[must_use]
    pub fn matches(&self, identifier: &str, password: &str) -> bool {
        self.identifier == identifier && self.password == password
    }
}

/// Candidate fields for a new account; the store fills in the defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identifier: String,
    pub password: String,
    pub role: Option<Role>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl NewUser {
    #[must_use]
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            name: self.name,
            email: self.email,
            phone: self.phone,
            identifier: self.identifier,
            password: self.password,
            role: self.role.unwrap_or_default(),
        }
    }
}
