use super::{
    error_response, identifier_within_limit, missing_payload, notice_response,
    types::{AuthenticatedResponse, LoginRequest, NoticeResponse},
};
use crate::{
    api::state::AppState,
    auth::{self, login::welcome_notice, SessionContext},
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path= "/v1/auth/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", body = AuthenticatedResponse),
        (status = 400, description = "Malformed request", body = NoticeResponse),
        (status = 401, description = "Invalid Aadhaar or password", body = NoticeResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return missing_payload(),
    };

    debug!("request: {:?}", request);

    if !identifier_within_limit(&request.identifier) {
        return notice_response(
            StatusCode::BAD_REQUEST,
            "Login failed",
            "Aadhaar number is too long",
        );
    }

    let mut context = SessionContext::new();
    let result = {
        let store = state.store().lock().await;
        auth::login(
            &**store,
            &mut context,
            &request.identifier,
            &request.password,
        )
    };

    match result {
        Ok(session) => {
            let token = state.sessions().insert(session.clone()).await;
            let body = AuthenticatedResponse::new(token, &session, welcome_notice(&session));
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(&err),
    }
}
