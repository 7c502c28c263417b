pub mod health;
pub mod login;
pub mod register;
pub mod session;
pub mod types;

// common functions for the handlers
use crate::auth::{code::CODE_LENGTH, user::IDENTIFIER_MAX_LENGTH, AuthError};
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::error;
use types::NoticeResponse;

pub fn identifier_within_limit(identifier: &str) -> bool {
    identifier.chars().count() <= IDENTIFIER_MAX_LENGTH
}

pub fn code_within_limit(code: &str) -> bool {
    code.chars().count() <= CODE_LENGTH
}

pub(crate) fn notice_response(status: StatusCode, title: &str, description: &str) -> Response {
    (
        status,
        Json(NoticeResponse {
            title: title.to_string(),
            description: description.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn missing_payload() -> Response {
    notice_response(StatusCode::BAD_REQUEST, "Invalid request", "Missing payload")
}

/// Map a flow error to its status; the body is always the user notice.
pub(crate) fn error_response(err: &AuthError) -> Response {
    let status = match err {
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::InvalidVerificationCode | AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
        AuthError::NoPendingRegistration | AuthError::AlreadyRegistered => StatusCode::CONFLICT,
        AuthError::Store(source) => {
            error!("User store failure: {source:?}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let notice = err.notice();
    (status, Json(NoticeResponse::from(notice))).into_response()
}

pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn identifier_limit_counts_chars() {
        assert!(identifier_within_limit("123456789012"));
        assert!(!identifier_within_limit("1234567890123"));
        assert!(identifier_within_limit(""));
    }

    #[test]
    fn code_limit() {
        assert!(code_within_limit("482913"));
        assert!(!code_within_limit("4829130"));
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert!(extract_bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn error_statuses() {
        assert_eq!(
            error_response(&AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_response(&AuthError::InvalidVerificationCode).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(&AuthError::NoPendingRegistration).status(),
            StatusCode::CONFLICT
        );
    }
}
