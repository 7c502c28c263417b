//! "Logged in as" state shared by the login and registration flows.

use super::user::{Role, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

/// Public view of an authenticated account. Never carries the password.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identifier: String,
    pub role: Role,
}

impl From<&UserRecord> for Session {
    fn from(user: &UserRecord) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            identifier: user.identifier.clone(),
            role: user.role,
        }
    }
}

pub trait SessionBoundary {
    fn establish_session(&mut self, user: &UserRecord);
}

/// Explicit holder for the current session.
///
/// Created empty when the application starts and cleared on logout; it is
/// passed to the flows instead of living in a global.
#[derive(Debug, Default)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(session) = self.current.take() {
            debug!(identifier = %session.identifier, "session cleared");
        }
    }

    pub fn take(&mut self) -> Option<Session> {
        self.current.take()
    }
}

impl SessionBoundary for SessionContext {
    fn establish_session(&mut self, user: &UserRecord) {
        debug!(identifier = %user.identifier, role = %user.role, "session established");
        self.current = Some(Session::from(user));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserRecord {
        UserRecord {
            name: "Ravi".to_string(),
            email: "r@x.com".to_string(),
            phone: "1112223334".to_string(),
            identifier: "111122223333".to_string(),
            password: "secret".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn context_starts_empty() {
        let context = SessionContext::new();
        assert!(!context.is_authenticated());
        assert!(context.current().is_none());
    }

    #[test]
    fn establish_then_clear() {
        let mut context = SessionContext::new();
        context.establish_session(&admin());
        assert_eq!(context.current().map(|s| s.role), Some(Role::Admin));

        context.clear();
        assert!(!context.is_authenticated());
    }

    #[test]
    fn session_has_no_password() -> anyhow::Result<()> {
        let value = serde_json::to_value(Session::from(&admin()))?;
        assert!(value.get("password").is_none());
        Ok(())
    }
}
