// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, auth, sessions},
    middleware::rate_limit::login_rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::Method,
    routing::{delete, get, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    build_router_with_rate_limiter(state, true)
}

/// Router assembly with the login rate limiter optional, so in-process
/// tests that drive the router without a client socket are not throttled.
pub fn build_router_with_rate_limiter(state: HttpState, rate_limited: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    let login = if rate_limited {
        post(auth::login).layer(login_rate_limit_layer())
    } else {
        post(auth::login)
    };

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/auth/login", login)
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/sessions", get(sessions::list_sessions))
        .route("/api/v1/sessions/stats", get(sessions::session_stats))
        .route("/api/v1/sessions/{id}", delete(sessions::terminate_session))
        .route("/api/v1/audit", get(audit::list_audit_entries))
        .route("/api/v1/audit/stats", get(audit::audit_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
