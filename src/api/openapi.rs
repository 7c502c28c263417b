use super::handlers::{health, login, register, session, types};
use crate::auth::{Role, Session};
use utoipa::openapi::{Contact, License};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        login::login,
        register::register,
        register::resubmit,
        register::back,
        register::verify,
        session::session,
        session::logout,
    ),
    components(schemas(
        health::Health,
        types::LoginRequest,
        types::RegisterRequest,
        types::RegisterResponse,
        types::VerifyRequest,
        types::AuthenticatedResponse,
        types::NoticeResponse,
        Session,
        Role,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Login, OTP registration and sessions"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc.info.description = non_empty(env!("CARGO_PKG_DESCRIPTION")).map(str::to_string);
    doc.info.contact = cargo_contact();
    doc.info.license = cargo_license();

    doc
}

/// First entry of the colon separated `CARGO_PKG_AUTHORS`.
fn cargo_contact() -> Option<Contact> {
    let (name, email) = parse_author(env!("CARGO_PKG_AUTHORS").split(':').next()?);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    non_empty(env!("CARGO_PKG_LICENSE")).map(|spdx| {
        let mut license = License::new(spdx);
        license.identifier = Some(spdx.to_string());
        license
    })
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

/// Split `Name <email>`; either half may be missing.
fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    match author.split_once('<') {
        Some((name, rest)) => (
            non_empty(name),
            non_empty(rest.strip_suffix('>').unwrap_or(rest)),
        ),
        None => (non_empty(author), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));

        let contact = doc.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("Team Citifix"));
            assert_eq!(contact.email.as_deref(), Some("team@citifix.dev"));
        }

        assert_eq!(
            doc.info.license.map(|l| l.name),
            Some("BSD-3-Clause".to_string())
        );
    }

    #[test]
    fn openapi_paths() {
        let doc = openapi();
        for path in [
            "/health",
            "/v1/auth/login",
            "/v1/auth/register",
            "/v1/auth/register/{id}/profile",
            "/v1/auth/register/{id}/back",
            "/v1/auth/register/{id}/verify",
            "/v1/auth/session",
            "/v1/auth/logout",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Team Citifix <team@citifix.dev>"),
            (Some("Team Citifix"), Some("team@citifix.dev"))
        );
        assert_eq!(parse_author("Solo"), (Some("Solo"), None));
        assert_eq!(parse_author("<only@mail>"), (None, Some("only@mail")));
        assert_eq!(parse_author("  "), (None, None));
    }
}
