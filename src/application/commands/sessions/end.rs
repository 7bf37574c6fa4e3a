// src/application/commands/sessions/end.rs
use super::SessionRegistry;
use crate::application::error::ApplicationResult;
use crate::domain::session::entity::{LogoutReason, Session, SessionId};
use crate::domain::user::UserId;

impl SessionRegistry {
    /// End every active session of the user. Finding none is a successful
    /// zero, not an error.
    pub async fn end_user_sessions(
        &self,
        user_id: UserId,
        reason: LogoutReason,
    ) -> ApplicationResult<u64> {
        self.repo
            .end_user_sessions(user_id, reason, self.clock.now())
            .await
            .map_err(Into::into)
    }

    /// End one specific session. NotFound when it does not exist or was
    /// already ended, so callers can tell a repeat from a first logout.
    pub async fn end_session(
        &self,
        id: SessionId,
        reason: LogoutReason,
    ) -> ApplicationResult<Session> {
        self.repo
            .end_session(id, reason, self.clock.now())
            .await
            .map_err(Into::into)
    }

    pub async fn active_sessions_count(&self) -> ApplicationResult<u64> {
        self.repo.count_active().await.map_err(Into::into)
    }
}
