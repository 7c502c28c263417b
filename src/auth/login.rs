use super::{
    error::{AuthError, Notice},
    session::{Session, SessionBoundary},
    store::UserStore,
};
use tracing::{debug, instrument, warn};

/// Check an identifier/password pair against the store.
///
/// The first record matching both fields wins, so duplicate identifiers bind
/// to the earliest registration. Unknown identifiers and wrong passwords are
/// reported the same way.
///
/// # Errors
/// `InvalidCredentials` when nothing matches, `Store` if the users cannot be
/// read. Neither establishes a session.
#[instrument(skip(store, session, password))]
pub fn login<S, B>(
    store: &S,
    session: &mut B,
    identifier: &str,
    password: &str,
) -> Result<Session, AuthError>
where
    S: UserStore + ?Sized,
    B: SessionBoundary + ?Sized,
{
    let users = store.list_users()?;

    let Some(user) = users.iter().find(|u| u.matches(identifier, password)) else {
        warn!("login rejected");
        return Err(AuthError::InvalidCredentials);
    };

    session.establish_session(user);
    debug!(role = %user.role, "login accepted");

    Ok(Session::from(user))
}

#[must_use]
pub fn welcome_notice(session: &Session) -> Notice {
    Notice {
        title: "Welcome back!",
        description: format!("Logged in as {}", session.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{
        session::SessionContext,
        store::MemoryUserStore,
        user::{Role, UserRecord},
    };
    use anyhow::Result;

    fn user(identifier: &str, password: &str, role: Role, name: &str) -> UserRecord {
        UserRecord {
            name: name.to_string(),
            email: format!("{name}@x.com"),
            phone: "9998887770".to_string(),
            identifier: identifier.to_string(),
            password: password.to_string(),
            role,
        }
    }

    #[test]
    fn unknown_identifier_and_wrong_password_look_the_same() {
        let store =
            MemoryUserStore::with_users(vec![user("111122223333", "secret", Role::Admin, "r")]);
        let mut context = SessionContext::new();

        let unknown = login(&store, &mut context, "000000000000", "secret");
        let wrong = login(&store, &mut context, "111122223333", "wrong");

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
        assert!(!context.is_authenticated());
    }

    #[test]
    fn empty_store_rejects() {
        let store = MemoryUserStore::new();
        let mut context = SessionContext::new();
        assert!(matches!(
            login(&store, &mut context, "", ""),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn first_duplicate_wins() -> Result<()> {
        let store = MemoryUserStore::with_users(vec![
            user("123456789012", "pw", Role::Citizen, "first"),
            user("123456789012", "pw", Role::Admin, "second"),
        ]);
        let mut context = SessionContext::new();
        let session = login(&store, &mut context, "123456789012", "pw")?;
        assert_eq!(session.name, "first");
        assert_eq!(session.role, Role::Citizen);
        Ok(())
    }

    #[test]
    fn duplicate_identifier_with_other_password_still_matches() -> Result<()> {
        let store = MemoryUserStore::with_users(vec![
            user("123456789012", "one", Role::Citizen, "first"),
            user("123456789012", "two", Role::Admin, "second"),
        ]);
        let mut context = SessionContext::new();
        let session = login(&store, &mut context, "123456789012", "two")?;
        assert_eq!(session.name, "second");
        Ok(())
    }

    #[test]
    fn welcome_names_the_user() {
        let session = Session::from(&user("1", "p", Role::Citizen, "Asha"));
        assert_eq!(welcome_notice(&session).description, "Logged in as Asha");
    }
}
