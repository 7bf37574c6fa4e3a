// src/application/queries/audit/list.rs
use super::{AuditQueryService, common};
use crate::application::{
    dto::{AuditEntryDto, AuthenticatedUser, CursorPage},
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::audit::cursor::PageCursor;
use crate::domain::audit::entity::AuditEvent;
use crate::domain::audit::repository::AuditFilter;
use chrono::{DateTime, Utc};

pub struct ListAuditEntriesQuery {
    pub actor_id: Option<i64>,
    pub event: Option<String>,
    pub subject_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    pub async fn list_entries(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditEntriesQuery,
    ) -> ApplicationResult<CursorPage<AuditEntryDto>> {
        common::ensure_admin(actor)?;
        let limit = common::normalize_limit(query.limit);
        let cursor = decode_cursor(query.cursor.as_deref())?;

        let event = query
            .event
            .as_deref()
            .map(str::parse::<AuditEvent>)
            .transpose()
            .map_err(ApplicationError::from)?;

        let filter = AuditFilter {
            actor_id: query.actor_id,
            event,
            subject_type: query.subject_type,
            from: query.from,
            to: query.to,
            search: normalize_search(query.search),
        };

        let (items, next_cursor) = self
            .repo
            .list(&filter, limit, cursor)
            .await
            .map_err(ApplicationError::from)?;
        let dtos: Vec<_> = items.into_iter().map(Into::<AuditEntryDto>::into).collect();
        Ok(CursorPage::new(dtos, next_cursor))
    }
}

fn decode_cursor(cursor: Option<&str>) -> ApplicationResult<Option<PageCursor>> {
    match cursor {
        Some(token) => Ok(Some(
            PageCursor::decode(token).map_err(ApplicationError::from)?,
        )),
        None => Ok(None),
    }
}

fn normalize_search(search: Option<String>) -> Option<String> {
    search.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
