use crate::application::dto::{AuditEntryDto, CursorPage};
use crate::application::queries::audit::{AuditStatsDto, AuditStatsQuery, ListAuditEntriesQuery};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use chrono::{DateTime, Utc};

fn default_limit() -> u32 {
    20
}

#[derive(Debug, serde::Deserialize)]
pub struct ListAuditParams {
    #[serde(default)]
    pub actor_id: Option<i64>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub q: Option<String>,
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

pub async fn list_audit_entries(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<CursorPage<AuditEntryDto>>> {
    let res = state
        .services
        .audit_queries
        .list_entries(
            &actor,
            ListAuditEntriesQuery {
                actor_id: params.actor_id,
                event: params.event,
                subject_type: params.subject_type,
                from: params.from,
                to: params.to,
                search: params.q,
                limit: params.limit,
                cursor: params.cursor,
            },
        )
        .await
        .into_http()?;
    Ok(Json(res))
}

pub async fn audit_stats(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<StatsParams>,
) -> HttpResult<Json<AuditStatsDto>> {
    let res = state
        .services
        .audit_queries
        .stats(
            &actor,
            AuditStatsQuery {
                from: params.from,
                to: params.to,
            },
        )
        .await
        .into_http()?;
    Ok(Json(res))
}
