// src/application/queries/sessions/list.rs
use super::SessionQueryService;
use crate::application::queries::audit::common::{ensure_admin, normalize_limit};
use crate::application::{
    dto::{AuthenticatedUser, CursorPage, SessionDto},
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::audit::cursor::PageCursor;
use crate::domain::session::repository::SessionFilter;
use chrono::{DateTime, Utc};

pub struct ListSessionsQuery {
    pub user_id: Option<i64>,
    pub active: Option<bool>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl SessionQueryService {
    pub async fn list_sessions(
        &self,
        actor: &AuthenticatedUser,
        query: ListSessionsQuery,
    ) -> ApplicationResult<CursorPage<SessionDto>> {
        ensure_admin(actor)?;
        let limit = normalize_limit(query.limit);
        let cursor = match query.cursor.as_deref() {
            Some(token) => Some(PageCursor::decode(token).map_err(ApplicationError::from)?),
            None => None,
        };

        let filter = SessionFilter {
            user_id: query.user_id,
            active: query.active,
            from: query.from,
            to: query.to,
        };

        let (items, next_cursor) = self
            .repo
            .list(&filter, limit, cursor)
            .await
            .map_err(ApplicationError::from)?;

        let now = self.clock.now();
        let dtos: Vec<_> = items
            .into_iter()
            .map(|s| SessionDto::from_session(s, now))
            .collect();
        Ok(CursorPage::new(dtos, next_cursor))
    }
}
