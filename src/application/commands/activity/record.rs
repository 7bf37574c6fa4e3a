// src/application/commands/activity/record.rs
use super::ActivityRecorder;
use crate::application::error::ApplicationResult;
use crate::domain::audit::diff::diff;
use crate::domain::audit::entity::{
    ActorRef, AuditEntry, AuditEvent, RequestContext, SubjectRef,
};
use serde_json::{Map, Value};

pub struct RecordActivity {
    pub actor: Option<ActorRef>,
    pub event: AuditEvent,
    pub subject: Option<SubjectRef>,
    pub old_values: Option<Map<String, Value>>,
    pub new_values: Option<Map<String, Value>>,
    pub context: RequestContext,
    pub tags: Vec<String>,
}

impl ActivityRecorder {
    /// Append one entry to the ledger. The write is synchronous and happens
    /// exactly once before this returns; a persistence failure surfaces to
    /// the caller. Field changes are derived here from the snapshots, not
    /// by any storage-side change tracking.
    pub async fn record(&self, activity: RecordActivity) -> ApplicationResult<AuditEntry> {
        let changed_fields = diff(activity.old_values.as_ref(), activity.new_values.as_ref());

        let entry = AuditEntry {
            id: None,
            actor: activity.actor,
            event: activity.event,
            subject: activity.subject,
            old_values: activity.old_values,
            new_values: activity.new_values,
            changed_fields,
            context: activity.context,
            tags: activity.tags,
            created_at: None,
        };

        self.repo.insert(entry).await.map_err(Into::into)
    }
}
