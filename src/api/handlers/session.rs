//! Session lookup and logout for bearer tokens issued at login/registration.

use super::extract_bearer_token;
use crate::{api::state::AppState, auth::Session};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session is active", body = Session),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn session(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    // Missing or unknown tokens are treated as "no session".
    let Some(token) = extract_bearer_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    match state.sessions().get(&token).await {
        Some(session) => (StatusCode::OK, Json(session)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    if let Some(token) = extract_bearer_token(&headers) {
        if state.sessions().remove(&token).await.is_some() {
            debug!("session removed");
        }
    }

    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryUserStore, Role};
    use axum::http::{header::AUTHORIZATION, HeaderValue};

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    #[tokio::test]
    async fn no_token_means_no_session() {
        let state = Arc::new(AppState::new(MemoryUserStore::new()));
        let response = session(HeaderMap::new(), Extension(state))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let state = Arc::new(AppState::new(MemoryUserStore::new()));
        let token = state
            .sessions()
            .insert(Session {
                name: "Asha".to_string(),
                email: "a@x.com".to_string(),
                phone: "9998887770".to_string(),
                identifier: "123456789012".to_string(),
                role: Role::Citizen,
            })
            .await;

        let response = session(bearer(&token), Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = logout(bearer(&token), Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = session(bearer(&token), Extension(state))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn logout_without_token_is_fine() {
        let state = Arc::new(AppState::new(MemoryUserStore::new()));
        let response = logout(HeaderMap::new(), Extension(state))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
