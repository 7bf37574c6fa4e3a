// src/presentation/http/controllers/sessions.rs
use crate::application::dto::{CursorPage, SessionDto};
use crate::application::error::ApplicationError;
use crate::application::queries::sessions::{
    ListSessionsQuery, SessionStatsDto, SessionStatsQuery,
};
use crate::domain::session::SessionId;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientInfo};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use chrono::{DateTime, Utc};

fn default_limit() -> u32 {
    20
}

#[derive(Debug, serde::Deserialize)]
pub struct ListSessionsParams {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions",
    params(
        ("user_id" = Option<i64>, Query, description = "Only sessions of this user"),
        ("active" = Option<bool>, Query, description = "Only active (true) or ended (false) sessions"),
        ("limit" = Option<u32>, Query, description = "Page size, capped at 100"),
        ("cursor" = Option<String>, Query, description = "Opaque pagination cursor")
    ),
    responses(
        (status = 200, description = "Page of sessions, newest first.", body = CursorPage<SessionDto>),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Sessions"
)]
pub async fn list_sessions(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<ListSessionsParams>,
) -> HttpResult<Json<CursorPage<SessionDto>>> {
    let res = state
        .services
        .session_queries
        .list_sessions(
            &actor,
            ListSessionsQuery {
                user_id: params.user_id,
                active: params.active,
                from: params.from,
                to: params.to,
                limit: params.limit,
                cursor: params.cursor,
            },
        )
        .await
        .into_http()?;
    Ok(Json(res))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{id}",
    params(("id" = i64, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session terminated.", body = SessionDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Session missing or already ended.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Sessions"
)]
pub async fn terminate_session(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ClientInfo(context): ClientInfo,
    Path(id): Path<i64>,
) -> HttpResult<Json<SessionDto>> {
    let session_id = SessionId::new(id)
        .map_err(|_| HttpError::from_error(ApplicationError::not_found(format!("session {id}"))))?;

    let res = state
        .services
        .auth
        .terminate_session(&actor, session_id, context)
        .await
        .into_http()?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/stats",
    responses(
        (status = 200, description = "Active-session count and grouped totals.", body = SessionStatsDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Sessions"
)]
pub async fn session_stats(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<StatsParams>,
) -> HttpResult<Json<SessionStatsDto>> {
    let res = state
        .services
        .session_queries
        .stats(
            &actor,
            SessionStatsQuery {
                from: params.from,
                to: params.to,
            },
        )
        .await
        .into_http()?;
    Ok(Json(res))
}
