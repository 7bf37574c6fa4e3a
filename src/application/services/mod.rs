// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            activity::ActivityRecorder, auth::SecurityEventCorrelator, sessions::SessionRegistry,
        },
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        ports::{
            security::{PasswordHasher, TokenCodec},
            time::Clock,
        },
        queries::{audit::AuditQueryService, sessions::SessionQueryService},
    },
    domain::{
        audit::repository::AuditEntryRepository, session::repository::SessionRepository,
        user::UserRepository,
    },
};

pub struct ApplicationServices {
    pub activity: Arc<ActivityRecorder>,
    pub sessions: Arc<SessionRegistry>,
    pub auth: Arc<SecurityEventCorrelator>,
    pub audit_queries: Arc<AuditQueryService>,
    pub session_queries: Arc<SessionQueryService>,
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    token_codec: Arc<dyn TokenCodec>,
}

impl ApplicationServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        audit_repo: Arc<dyn AuditEntryRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let activity = Arc::new(ActivityRecorder::new(Arc::clone(&audit_repo)));
        let sessions = Arc::new(SessionRegistry::new(
            Arc::clone(&session_repo),
            Arc::clone(&clock),
        ));
        let auth = Arc::new(SecurityEventCorrelator::new(
            Arc::clone(&user_repo),
            Arc::clone(&sessions),
            Arc::clone(&activity),
            Arc::clone(&password_hasher),
            Arc::clone(&token_codec),
            Arc::clone(&clock),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&audit_repo)));
        let session_queries = Arc::new(SessionQueryService::new(
            Arc::clone(&session_repo),
            Arc::clone(&clock),
        ));

        Self {
            activity,
            sessions,
            auth,
            audit_queries,
            session_queries,
            user_repo,
            session_repo,
            token_codec,
        }
    }

    /// Resolve a raw bearer token to the principal behind it: integrity
    /// check first, then the active session it names, then the account.
    /// Every failure collapses into the same unauthorized answer.
    pub async fn authenticate_token(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_codec.verify(token)?;

        let session = self
            .session_repo
            .find_active_by_token(token)
            .await
            .map_err(ApplicationError::from)?
            .ok_or_else(|| ApplicationError::unauthorized("invalid or expired session"))?;

        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await
            .map_err(ApplicationError::from)?
            .ok_or_else(|| ApplicationError::unauthorized("invalid or expired session"))?;

        if !user.is_active {
            return Err(ApplicationError::unauthorized("invalid or expired session"));
        }

        Ok(AuthenticatedUser {
            id: user.id,
            email: user.email.to_string(),
            role: user.role,
            session_id: session.id,
        })
    }
}
