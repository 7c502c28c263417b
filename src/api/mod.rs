//! HTTP JSON surface for the login and registration flows.

use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use url::Url;

pub mod handlers;
mod openapi;
pub mod state;

pub use openapi::openapi;
pub use state::{AppState, SessionRegistry};

use handlers::{health, login, register, session};

/// Build the application router; CORS is added by [`serve`].
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/openapi.json", get(openapi_json))
        .route("/v1/auth/login", post(login::login))
        .route("/v1/auth/register", post(register::register))
        .route("/v1/auth/register/:id/profile", post(register::resubmit))
        .route("/v1/auth/register/:id/back", post(register::back))
        .route("/v1/auth/register/:id/verify", post(register::verify))
        .route("/v1/auth/session", get(session::session))
        .route("/v1/auth/logout", post(session::logout))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

async fn openapi_json() -> impl IntoResponse {
    Json(openapi())
}

/// Start the server
/// # Errors
/// Return error if the frontend URL is invalid or the listener fails
pub async fn serve(port: u16, frontend_base_url: &str, state: Arc<AppState>) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(AllowOrigin::exact(frontend_origin(frontend_base_url)?));

    let app = router(state).layer(cors);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

/// CORS origin (`scheme://host[:port]`) of the frontend base URL.
fn frontend_origin(frontend_base_url: &str) -> Result<HeaderValue> {
    let origin = Url::parse(frontend_base_url)
        .with_context(|| format!("Invalid frontend base URL: {frontend_base_url}"))?
        .origin();
    if !origin.is_tuple() {
        return Err(anyhow!(
            "Frontend base URL has no usable origin: {frontend_base_url}"
        ));
    }
    HeaderValue::from_str(&origin.ascii_serialization())
        .context("Failed to build frontend origin header")
}
