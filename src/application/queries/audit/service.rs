// src/application/queries/audit/service.rs
use std::sync::Arc;

use crate::domain::audit::repository::AuditEntryRepository;

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditEntryRepository>,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditEntryRepository>) -> Self {
        Self { repo }
    }
}
