// src/application/dto/audit.rs
use crate::domain::audit::entity::{AuditEntry, ChangedFields};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActorDto {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditEntryDto {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorDto>,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    #[schema(value_type = Object)]
    pub changed_fields: ChangedFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub tags: Vec<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<AuditEntry> for AuditEntryDto {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id.unwrap_or_default(),
            actor: entry.actor.map(|actor| ActorDto {
                kind: actor.kind().to_string(),
                id: actor.user_id().map(Into::into),
            }),
            event: entry.event.as_str().to_string(),
            subject_type: entry.subject.as_ref().map(|s| s.kind.clone()),
            subject_id: entry.subject.as_ref().map(|s| s.id),
            changed_fields: entry.changed_fields,
            ip: entry.context.ip,
            url: entry.context.url,
            tags: entry.tags,
            created_at: entry.created_at.unwrap_or_default(),
        }
    }
}
