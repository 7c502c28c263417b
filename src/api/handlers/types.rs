//! Request/response types for the account endpoints.

use crate::auth::{Notice, Profile, Role, Session};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

#[derive(ToSchema, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("identifier", &self.identifier)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for Profile {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            identifier: request.identifier,
            password: SecretString::from(request.password),
            role: request.role,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub registration_id: String,
    /// Mock delivery: the code is returned to the same client.
    pub code: String,
    pub title: String,
    pub description: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyRequest {
    pub code: String,
}

/// Returned after a successful login or registration.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuthenticatedResponse {
    pub token: String,
    pub name: String,
    pub role: Role,
    pub redirect: String,
    pub title: String,
    pub description: String,
}

impl AuthenticatedResponse {
    #[must_use]
    pub fn new(token: String, session: &Session, notice: Notice) -> Self {
        Self {
            token,
            name: session.name.clone(),
            role: session.role,
            redirect: session.role.destination().to_string(),
            title: notice.title.to_string(),
            description: notice.description,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct NoticeResponse {
    pub title: String,
    pub description: String,
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        Self {
            title: notice.title.to_string(),
            description: notice.description,
        }
    }
}
