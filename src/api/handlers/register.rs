//! Registration endpoints. Each in-flight registration is a
//! [`RegistrationWizard`] keyed by a ULID handed back to the client.

use super::{
    code_within_limit, error_response, identifier_within_limit, missing_payload, notice_response,
    types::{AuthenticatedResponse, NoticeResponse, RegisterRequest, RegisterResponse, VerifyRequest},
};
use crate::{
    api::state::AppState,
    auth::{
        register::{code_sent_notice, registered_notice},
        AuthError, Profile, RegistrationWizard, SessionContext, VerificationCode,
    },
};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, instrument};
use ulid::Ulid;

fn registration_created(status: StatusCode, id: Ulid, code: &VerificationCode) -> Response {
    let notice = code_sent_notice(code);
    let body = RegisterResponse {
        registration_id: id.to_string(),
        code: code.to_string(),
        title: notice.title.to_string(),
        description: notice.description,
    };
    (status, Json(body)).into_response()
}

fn unknown_registration() -> Response {
    notice_response(
        StatusCode::NOT_FOUND,
        "Registration not found",
        "Please start the registration again",
    )
}

fn invalid_identifier() -> Response {
    notice_response(
        StatusCode::BAD_REQUEST,
        "Invalid details",
        "Aadhaar number is too long",
    )
}

fn parse_profile(payload: Option<Json<RegisterRequest>>) -> Result<Profile, Response> {
    let request = match payload {
        Some(Json(payload)) => payload,
        None => return Err(missing_payload()),
    };
    debug!("request: {:?}", request);

    if !identifier_within_limit(&request.identifier) {
        return Err(invalid_identifier());
    }
    Ok(Profile::from(request))
}

#[utoipa::path(
    post,
    path= "/v1/auth/register",
    request_body = RegisterRequest,
    responses (
        (status = 201, description = "Profile accepted, OTP issued", body = RegisterResponse),
        (status = 400, description = "Missing or invalid details", body = NoticeResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn register(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let profile = match parse_profile(payload) {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    let mut wizard = RegistrationWizard::new();
    let code = match wizard.submit_profile(profile, &mut rand::thread_rng()) {
        Ok(code) => code,
        Err(err) => return error_response(&err),
    };

    let id = state.start_registration(wizard).await;
    debug!(registration_id = %id, "registration started");

    registration_created(StatusCode::CREATED, id, &code)
}

#[utoipa::path(
    post,
    path= "/v1/auth/register/{id}/profile",
    params(("id" = String, Path, description = "Registration id")),
    request_body = RegisterRequest,
    responses (
        (status = 200, description = "Profile resubmitted, new OTP issued", body = RegisterResponse),
        (status = 400, description = "Missing or invalid details", body = NoticeResponse),
        (status = 404, description = "Unknown registration", body = NoticeResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all, fields(registration_id = %id))]
pub async fn resubmit(
    state: Extension<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let Ok(id) = Ulid::from_string(&id) else {
        return unknown_registration();
    };
    let profile = match parse_profile(payload) {
        Ok(profile) => profile,
        Err(response) => return response,
    };

    let mut registrations = state.registrations().lock().await;
    let Some(wizard) = registrations.get_mut(&id) else {
        return unknown_registration();
    };

    match wizard.submit_profile(profile, &mut rand::thread_rng()) {
        Ok(code) => registration_created(StatusCode::OK, id, &code),
        Err(err) => error_response(&err),
    }
}

#[utoipa::path(
    post,
    path= "/v1/auth/register/{id}/back",
    params(("id" = String, Path, description = "Registration id")),
    responses (
        (status = 204, description = "Code discarded, profile can be edited"),
        (status = 404, description = "Unknown registration", body = NoticeResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all, fields(registration_id = %id))]
pub async fn back(state: Extension<Arc<AppState>>, Path(id): Path<String>) -> impl IntoResponse {
    let Ok(id) = Ulid::from_string(&id) else {
        return unknown_registration();
    };

    let mut registrations = state.registrations().lock().await;
    match registrations.get_mut(&id) {
        Some(wizard) => {
            wizard.back();
            StatusCode::NO_CONTENT.into_response()
        }
        None => unknown_registration(),
    }
}

#[utoipa::path(
    post,
    path= "/v1/auth/register/{id}/verify",
    params(("id" = String, Path, description = "Registration id")),
    request_body = VerifyRequest,
    responses (
        (status = 201, description = "Account created and session established", body = AuthenticatedResponse),
        (status = 400, description = "Invalid OTP", body = NoticeResponse),
        (status = 404, description = "Unknown registration", body = NoticeResponse),
        (status = 409, description = "No OTP pending for this registration", body = NoticeResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all, fields(registration_id = %id))]
pub async fn verify(
    state: Extension<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<VerifyRequest>>,
) -> impl IntoResponse {
    let Ok(id) = Ulid::from_string(&id) else {
        return unknown_registration();
    };
    let request = match payload {
        Some(Json(payload)) => payload,
        None => return missing_payload(),
    };

    if !code_within_limit(&request.code) {
        return error_response(&AuthError::InvalidVerificationCode);
    }

    let mut context = SessionContext::new();
    let result = {
        let mut registrations = state.registrations().lock().await;
        let Some(wizard) = registrations.get_mut(&id) else {
            return unknown_registration();
        };

        let mut store = state.store().lock().await;
        let result = wizard.verify(&request.code, &mut **store, &mut context);
        if result.is_ok() {
            registrations.remove(&id);
        }
        result
    };

    match result {
        Ok(session) => {
            let token = state.sessions().insert(session.clone()).await;
            let body = AuthenticatedResponse::new(token, &session, registered_notice());
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(err) => error_response(&err),
    }
}
