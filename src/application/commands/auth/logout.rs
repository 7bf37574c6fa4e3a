// src/application/commands/auth/logout.rs
use super::SecurityEventCorrelator;
use super::login::ClientContext;
use crate::application::commands::activity::RecordActivity;
use crate::application::dto::AuthenticatedUser;
use crate::application::error::ApplicationResult;
use crate::domain::audit::entity::{ActorRef, AuditEvent, SubjectRef};
use crate::domain::session::entity::{LogoutReason, Session};
use serde_json::{Map, json};

impl SecurityEventCorrelator {
    /// End the caller's own session. Logging out twice surfaces NotFound
    /// from the registry rather than pretending a second logout happened.
    pub async fn logout(
        &self,
        actor: &AuthenticatedUser,
        context: ClientContext,
    ) -> ApplicationResult<()> {
        let session = self
            .registry
            .end_session(actor.session_id, LogoutReason::UserLogout)
            .await?;

        let result = self
            .recorder
            .record(RecordActivity {
                actor: Some(ActorRef::User(actor.id)),
                event: AuditEvent::Logout,
                subject: Some(SubjectRef::new("session", session.id.into())),
                old_values: None,
                new_values: Some(logout_payload(&session)),
                context: context.to_request_context(),
                tags: vec!["authentication".into(), "logout".into()],
            })
            .await;

        if let Err(err) = result {
            self.escalate_audit_failure(AuditEvent::Logout, Some(actor.id.into()), err);
        }

        Ok(())
    }
}

pub(super) fn logout_payload(session: &Session) -> Map<String, serde_json::Value> {
    let mut payload = Map::new();
    payload.insert("session_id".into(), json!(i64::from(session.id)));
    payload.insert(
        "logout_reason".into(),
        json!(session.logout_reason.map(|r| r.as_str())),
    );
    payload
}
