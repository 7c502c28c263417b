use anyhow::Result;
use citifix::auth::{
    login, AuthError, MemoryUserStore, Role, SessionContext, UserRecord, UserStore,
};

fn record(identifier: &str, password: &str, role: Role) -> UserRecord {
    UserRecord {
        name: format!("user-{identifier}"),
        email: format!("{identifier}@citifix.dev"),
        phone: "9998887770".to_string(),
        identifier: identifier.to_string(),
        password: password.to_string(),
        role,
    }
}

fn seeded() -> MemoryUserStore {
    MemoryUserStore::with_users(vec![
        record("111122223333", "secret", Role::Admin),
        record("123456789012", "pw1", Role::Citizen),
        record("999988887777", "", Role::Citizen),
    ])
}

#[test]
fn admin_login_reports_admin_role() -> Result<()> {
    let store = seeded();
    let mut context = SessionContext::new();

    let session = login(&store, &mut context, "111122223333", "secret")?;

    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.role.destination(), "/admin");
    assert_eq!(context.current(), Some(&session));
    Ok(())
}

#[test]
fn wrong_password_is_invalid_credentials() {
    let store = seeded();
    let mut context = SessionContext::new();

    let result = login(&store, &mut context, "111122223333", "wrong");

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(!context.is_authenticated());
}

#[test]
fn every_stored_record_can_log_in_with_its_own_credentials() -> Result<()> {
    let store = seeded();
    for user in store.list_users()? {
        let mut context = SessionContext::new();
        let session = login(&store, &mut context, &user.identifier, &user.password)?;
        assert_eq!(session.identifier, user.identifier);
        assert_eq!(session.role, user.role);
        assert!(context.is_authenticated());
    }
    Ok(())
}

#[test]
fn crossed_credentials_never_match() -> Result<()> {
    let store = seeded();
    let users = store.list_users()?;
    for a in &users {
        for b in &users {
            if a.password == b.password {
                continue;
            }
            let mut context = SessionContext::new();
            let result = login(&store, &mut context, &a.identifier, &b.password);
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
            assert!(!context.is_authenticated());
        }
    }
    Ok(())
}

#[test]
fn no_normalization_is_applied() {
    let store = seeded();
    let mut context = SessionContext::new();

    for (identifier, password) in [
        (" 111122223333", "secret"),
        ("111122223333", "Secret"),
        ("1111 2222 3333", "secret"),
    ] {
        let result = login(&store, &mut context, identifier, password);
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
    assert!(!context.is_authenticated());
}

#[test]
fn failed_attempts_do_not_lock_out() -> Result<()> {
    let store = seeded();
    let mut context = SessionContext::new();
    for _ in 0..50 {
        assert!(login(&store, &mut context, "123456789012", "nope").is_err());
    }
    let session = login(&store, &mut context, "123456789012", "pw1")?;
    assert_eq!(session.role, Role::Citizen);
    Ok(())
}

#[test]
fn logout_clears_the_context() -> Result<()> {
    let store = seeded();
    let mut context = SessionContext::new();
    login(&store, &mut context, "123456789012", "pw1")?;
    context.clear();
    assert!(context.current().is_none());
    Ok(())
}
