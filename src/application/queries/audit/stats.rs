// src/application/queries/audit/stats.rs
use super::{AuditQueryService, common};
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub struct AuditStatsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventCountDto {
    pub event: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyActorsDto {
    pub day: NaiveDate,
    pub actors: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditStatsDto {
    pub events: Vec<EventCountDto>,
    pub daily_actors: Vec<DailyActorsDto>,
}

impl AuditQueryService {
    /// Dashboard aggregation: event counts plus distinct acting principals
    /// per day over the requested range.
    pub async fn stats(
        &self,
        actor: &AuthenticatedUser,
        query: AuditStatsQuery,
    ) -> ApplicationResult<AuditStatsDto> {
        common::ensure_admin(actor)?;

        let events = self
            .repo
            .count_by_event(query.from, query.to)
            .await
            .map_err(ApplicationError::from)?
            .into_iter()
            .map(|c| EventCountDto {
                event: c.event,
                count: c.count,
            })
            .collect();

        let daily_actors = self
            .repo
            .distinct_actors_per_day(query.from, query.to)
            .await
            .map_err(ApplicationError::from)?
            .into_iter()
            .map(|c| DailyActorsDto {
                day: c.day,
                actors: c.actors,
            })
            .collect();

        Ok(AuditStatsDto {
            events,
            daily_actors,
        })
    }
}
