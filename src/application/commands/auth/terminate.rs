// src/application/commands/auth/terminate.rs
use super::SecurityEventCorrelator;
use super::login::ClientContext;
use super::logout::logout_payload;
use crate::application::commands::activity::RecordActivity;
use crate::application::dto::{AuthenticatedUser, SessionDto};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::audit::entity::{ActorRef, AuditEvent, SubjectRef};
use crate::domain::session::entity::{LogoutReason, SessionId};

impl SecurityEventCorrelator {
    /// Administrative termination of any user's session. The ended session
    /// is returned as a historical record; terminating a session that does
    /// not exist or is already over is NotFound.
    pub async fn terminate_session(
        &self,
        actor: &AuthenticatedUser,
        session_id: SessionId,
        context: ClientContext,
    ) -> ApplicationResult<SessionDto> {
        if !actor.is_admin() {
            return Err(ApplicationError::forbidden(
                "only administrators may terminate sessions",
            ));
        }

        let session = self
            .registry
            .end_session(session_id, LogoutReason::AdminTerminate)
            .await?;

        let result = self
            .recorder
            .record(RecordActivity {
                actor: Some(ActorRef::User(actor.id)),
                event: AuditEvent::SessionTerminated,
                subject: Some(SubjectRef::new("session", session.id.into())),
                old_values: None,
                new_values: Some(logout_payload(&session)),
                context: context.to_request_context(),
                tags: vec!["authentication".into(), "security".into()],
            })
            .await;

        if let Err(err) = result {
            self.escalate_audit_failure(
                AuditEvent::SessionTerminated,
                Some(actor.id.into()),
                err,
            );
        }

        Ok(SessionDto::from_session(session, self.clock.now()))
    }
}
