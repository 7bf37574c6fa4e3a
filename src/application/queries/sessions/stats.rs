// src/application/queries/sessions/stats.rs
use super::SessionQueryService;
use crate::application::queries::audit::common::ensure_admin;
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub struct SessionStatsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupCountDto {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionStatsDto {
    pub active_sessions: u64,
    pub by_device: Vec<GroupCountDto>,
    pub by_login_method: Vec<GroupCountDto>,
}

impl SessionQueryService {
    pub async fn stats(
        &self,
        actor: &AuthenticatedUser,
        query: SessionStatsQuery,
    ) -> ApplicationResult<SessionStatsDto> {
        ensure_admin(actor)?;

        let active_sessions = self
            .repo
            .count_active()
            .await
            .map_err(ApplicationError::from)?;

        let by_device = self
            .repo
            .count_by_device(query.from, query.to)
            .await
            .map_err(ApplicationError::from)?
            .into_iter()
            .map(|(device, count)| GroupCountDto {
                key: device.as_str().to_string(),
                count,
            })
            .collect();

        let by_login_method = self
            .repo
            .count_by_login_method(query.from, query.to)
            .await
            .map_err(ApplicationError::from)?
            .into_iter()
            .map(|(method, count)| GroupCountDto {
                key: method.as_str().to_string(),
                count,
            })
            .collect();

        Ok(SessionStatsDto {
            active_sessions,
            by_device,
            by_login_method,
        })
    }
}
