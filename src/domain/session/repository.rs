// src/domain/session/repository.rs
use crate::domain::audit::cursor::PageCursor;
use crate::domain::errors::DomainResult;
use crate::domain::session::entity::{
    DeviceType, LoginMethod, LogoutReason, NewSession, Session, SessionId,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub user_id: Option<i64>,
    pub active: Option<bool>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, session: NewSession) -> DomainResult<Session>;

    /// End every active session of the user and insert the new one in a
    /// single transaction, serialized per user, so concurrent logins can
    /// never leave more than one active session behind. Returns the count
    /// of superseded sessions together with the session just started.
    async fn supersede_and_start(
        &self,
        session: NewSession,
        reason: LogoutReason,
    ) -> DomainResult<(u64, Session)>;

    /// Conditional update over the user's active sessions. Zero matches is
    /// a successful no-op.
    async fn end_user_sessions(
        &self,
        user_id: UserId,
        reason: LogoutReason,
        at: DateTime<Utc>,
    ) -> DomainResult<u64>;

    /// End one specific session. NotFound when the session does not exist
    /// or is already ended.
    async fn end_session(
        &self,
        id: SessionId,
        reason: LogoutReason,
        at: DateTime<Utc>,
    ) -> DomainResult<Session>;

    async fn find_by_id(&self, id: SessionId) -> DomainResult<Option<Session>>;

    async fn find_active_by_token(&self, token: &str) -> DomainResult<Option<Session>>;

    async fn count_active(&self) -> DomainResult<u64>;

    async fn list(
        &self,
        filter: &SessionFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Session>, Option<String>)>;

    async fn count_by_device(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<(DeviceType, u64)>>;

    async fn count_by_login_method(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<(LoginMethod, u64)>>;
}
