// src/application/commands/sessions/start.rs
use super::SessionRegistry;
use crate::application::error::ApplicationResult;
use crate::domain::session::entity::{LoginMethod, LogoutReason, NewSession, Session};
use crate::domain::session::user_agent::classify;
use crate::domain::user::UserId;

pub struct StartSession {
    pub user_id: UserId,
    pub session_token: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub login_method: LoginMethod,
}

impl SessionRegistry {
    /// Open a session without touching any existing ones. Device, browser
    /// and platform are derived from the user agent here; an unparseable
    /// agent string classifies as unknown and never blocks the call.
    pub async fn start_session(&self, command: StartSession) -> ApplicationResult<Session> {
        let session = self.build_session(command);
        self.repo.insert(session).await.map_err(Into::into)
    }

    /// Login-path variant: end whatever is active for the user and start
    /// the replacement inside one per-user transaction, so racing logins
    /// settle on exactly one surviving active session. Returns how many
    /// sessions were superseded alongside the new one.
    pub async fn begin_user_session(
        &self,
        command: StartSession,
    ) -> ApplicationResult<(u64, Session)> {
        let session = self.build_session(command);
        self.repo
            .supersede_and_start(session, LogoutReason::NewLogin)
            .await
            .map_err(Into::into)
    }

    fn build_session(&self, command: StartSession) -> NewSession {
        let device = classify(command.user_agent.as_deref());
        NewSession {
            session_token: command.session_token,
            user_id: command.user_id,
            ip: command.ip,
            user_agent: command.user_agent,
            device,
            login_method: command.login_method,
            login_at: self.clock.now(),
        }
    }
}
