// src/presentation/http/controllers/auth.rs
use crate::application::commands::auth::LoginCommand;
use crate::application::dto::{AuthTokenDto, UserDto};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientInfo};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserDto,
    pub token: AuthTokenDto,
    pub session_id: i64,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; any previous session for the user is superseded.", body = LoginResponse),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Malformed login payload.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    ClientInfo(context): ClientInfo,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<LoginResponse>> {
    let command = LoginCommand {
        email: payload.email,
        password: payload.password,
    };

    let outcome = state
        .services
        .auth
        .login(command, context)
        .await
        .into_http()?;

    Ok(Json(LoginResponse {
        session_id: outcome.session_id.into(),
        user: outcome.user,
        token: outcome.token,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Session ended.", body = crate::presentation::http::openapi::StatusResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Session already ended.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ClientInfo(context): ClientInfo,
) -> HttpResult<Json<crate::presentation::http::openapi::StatusResponse>> {
    state
        .services
        .auth
        .logout(&actor, context)
        .await
        .into_http()?;

    Ok(Json(crate::presentation::http::openapi::StatusResponse {
        status: "logged_out".into(),
    }))
}
