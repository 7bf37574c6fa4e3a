// src/application/commands/auth/login.rs
use super::SecurityEventCorrelator;
use crate::application::commands::activity::RecordActivity;
use crate::application::commands::sessions::StartSession;
use crate::application::dto::{AuthTokenDto, UserDto};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::audit::entity::{ActorRef, AuditEvent, RequestContext, SubjectRef};
use crate::domain::session::entity::{LoginMethod, Session, SessionId};
use crate::domain::user::{Email, User};
use serde_json::{Map, Value, json};

pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Request-scoped origin data, captured at the HTTP boundary and passed
/// down explicitly.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    pub url: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientContext {
    pub(super) fn to_request_context(&self) -> RequestContext {
        RequestContext {
            url: self.url.clone(),
            ip: self.ip.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub user: UserDto,
    pub token: AuthTokenDto,
    pub session_id: SessionId,
}

impl SecurityEventCorrelator {
    /// The login protocol. On credential success the user's previous
    /// sessions are superseded and the replacement started in one atomic
    /// step, then the success is recorded on the ledger. On failure only
    /// a ledger entry is written and the caller gets the same generic
    /// rejection no matter which check failed.
    pub async fn login(
        &self,
        command: LoginCommand,
        context: ClientContext,
    ) -> ApplicationResult<LoginOutcome> {
        let email = Email::new(command.email).map_err(ApplicationError::from)?;
        if command.password.is_empty() {
            return Err(ApplicationError::validation("password must not be empty"));
        }

        let Some(user) = self.verify_credentials(&email, &command.password).await? else {
            self.record_failed_login(&email, &context).await;
            return Err(ApplicationError::unauthorized("invalid credentials"));
        };

        let token = self.token_codec.issue();
        let (superseded, session) = self
            .registry
            .begin_user_session(StartSession {
                user_id: user.id,
                session_token: token.clone(),
                ip: context.ip.clone(),
                user_agent: context.user_agent.clone(),
                login_method: LoginMethod::WebSession,
            })
            .await?;

        // The session transaction is committed; from here on the login has
        // happened and an audit failure must not undo it.
        self.record_login_success(&user, &session, superseded, &context)
            .await;

        Ok(LoginOutcome {
            token: AuthTokenDto {
                token,
                issued_at: session.login_at,
                session_id: session.id.into(),
            },
            session_id: session.id,
            user: user.into(),
        })
    }

    async fn verify_credentials(
        &self,
        email: &Email,
        password: &str,
    ) -> ApplicationResult<Option<User>> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }
        match self
            .password_hasher
            .verify(password, &user.password_hash)
            .await
        {
            Ok(()) => Ok(Some(user)),
            Err(ApplicationError::Unauthorized(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn record_login_success(
        &self,
        user: &User,
        session: &Session,
        superseded: u64,
        context: &ClientContext,
    ) {
        let mut new_values = Map::new();
        new_values.insert(
            "login_method".into(),
            json!(session.login_method.as_str()),
        );
        new_values.insert("session_id".into(), json!(i64::from(session.id)));
        new_values.insert("ip".into(), json!(context.ip));
        new_values.insert("user_agent".into(), json!(context.user_agent));
        if superseded > 0 {
            // A re-login folds the supersession into this entry instead of
            // emitting a separate event.
            new_values.insert("superseded_sessions".into(), json!(superseded));
        }

        let result = self
            .recorder
            .record(RecordActivity {
                actor: Some(ActorRef::User(user.id)),
                event: AuditEvent::LoginSuccess,
                subject: Some(SubjectRef::new("user", user.id.into())),
                old_values: None,
                new_values: Some(new_values),
                context: context.to_request_context(),
                tags: vec!["authentication".into(), "login".into(), "web".into()],
            })
            .await;

        if let Err(err) = result {
            self.escalate_audit_failure(AuditEvent::LoginSuccess, Some(user.id.into()), err);
        }
    }

    async fn record_failed_login(&self, email: &Email, context: &ClientContext) {
        let mut new_values = Map::new();
        new_values.insert("email".into(), Value::String(email.to_string()));

        let result = self
            .recorder
            .record(RecordActivity {
                actor: None,
                event: AuditEvent::LoginFailed,
                subject: None,
                old_values: None,
                new_values: Some(new_values),
                context: context.to_request_context(),
                tags: vec![
                    "authentication".into(),
                    "security".into(),
                    "failed_login".into(),
                ],
            })
            .await;

        if let Err(err) = result {
            self.escalate_audit_failure(AuditEvent::LoginFailed, None, err);
        }
    }

    /// A lost security event needs manual reconciliation; route it to the
    /// operational channel with everything needed to reconstruct it, while
    /// the user-facing response stays unchanged.
    pub(super) fn escalate_audit_failure(
        &self,
        event: AuditEvent,
        user_id: Option<i64>,
        err: ApplicationError,
    ) {
        tracing::error!(
            event = %event,
            user_id = user_id,
            at = %self.clock.now(),
            error = %err,
            "audit write failed after commit"
        );
    }
}
