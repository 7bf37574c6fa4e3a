// src/application/commands/activity/service.rs
use std::sync::Arc;

use crate::domain::audit::repository::AuditEntryRepository;

/// The single append path into the activity ledger. Holding one of these
/// grants the ability to record events and nothing else; reading happens
/// through the query side, and no component can alter what was written.
pub struct ActivityRecorder {
    pub(super) repo: Arc<dyn AuditEntryRepository>,
}

impl ActivityRecorder {
    pub fn new(repo: Arc<dyn AuditEntryRepository>) -> Self {
        Self { repo }
    }
}
