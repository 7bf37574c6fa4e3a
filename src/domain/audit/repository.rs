// src/domain/audit/repository.rs
use crate::domain::audit::cursor::PageCursor;
use crate::domain::audit::entity::{AuditEntry, AuditEvent};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub actor_id: Option<i64>,
    pub event: Option<AuditEvent>,
    pub subject_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Free-text match over ip and url.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCount {
    pub event: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyActorCount {
    pub day: NaiveDate,
    pub actors: u64,
}

/// Append-only ledger access. The contract deliberately exposes no update
/// or delete operation over recorded entries.
#[async_trait]
pub trait AuditEntryRepository: Send + Sync {
    async fn insert(&self, entry: AuditEntry) -> DomainResult<AuditEntry>;

    async fn list(
        &self,
        filter: &AuditFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<AuditEntry>, Option<String>)>;

    async fn count_by_event(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<EventCount>>;

    async fn distinct_actors_per_day(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<DailyActorCount>>;
}
