// src/application/commands/auth/service.rs
use std::sync::Arc;

use crate::application::commands::activity::ActivityRecorder;
use crate::application::commands::sessions::SessionRegistry;
use crate::application::ports::security::{PasswordHasher, TokenCodec};
use crate::application::ports::time::Clock;
use crate::domain::user::UserRepository;

/// Orchestrates the security-relevant side of authentication: on a
/// credential decision it drives the session registry and the activity
/// recorder so the ledger and the session table always tell the same
/// story.
pub struct SecurityEventCorrelator {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) registry: Arc<SessionRegistry>,
    pub(super) recorder: Arc<ActivityRecorder>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_codec: Arc<dyn TokenCodec>,
    pub(super) clock: Arc<dyn Clock>,
}

impl SecurityEventCorrelator {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        registry: Arc<SessionRegistry>,
        recorder: Arc<ActivityRecorder>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            registry,
            recorder,
            password_hasher,
            token_codec,
            clock,
        }
    }
}
