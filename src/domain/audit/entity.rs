// src/domain/audit/entity.rs
use crate::domain::errors::DomainError;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// The principal responsible for an event. Anonymous events (e.g. a failed
/// login) carry no actor at all rather than a synthetic user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRef {
    User(UserId),
    System,
}

impl ActorRef {
    pub fn kind(&self) -> &'static str {
        match self {
            ActorRef::User(_) => "user",
            ActorRef::System => "system",
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            ActorRef::User(id) => Some(*id),
            ActorRef::System => None,
        }
    }
}

/// Reference to the entity an event is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRef {
    pub kind: String,
    pub id: i64,
}

impl SubjectRef {
    pub fn new(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    LoginSuccess,
    LoginFailed,
    Logout,
    SessionTerminated,
    Created,
    Updated,
    Deleted,
}

impl AuditEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEvent::LoginSuccess => "login_success",
            AuditEvent::LoginFailed => "login_failed",
            AuditEvent::Logout => "logout",
            AuditEvent::SessionTerminated => "session_terminated",
            AuditEvent::Created => "created",
            AuditEvent::Updated => "updated",
            AuditEvent::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditEvent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login_success" => Ok(AuditEvent::LoginSuccess),
            "login_failed" => Ok(AuditEvent::LoginFailed),
            "logout" => Ok(AuditEvent::Logout),
            "session_terminated" => Ok(AuditEvent::SessionTerminated),
            "created" => Ok(AuditEvent::Created),
            "updated" => Ok(AuditEvent::Updated),
            "deleted" => Ok(AuditEvent::Deleted),
            other => Err(DomainError::Validation(format!(
                "unknown audit event '{other}'"
            ))),
        }
    }
}

/// Where the request came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub url: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// One recorded field mutation. A side that is `None` means the key was
/// absent on that side, which is distinct from a present JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
}

pub type ChangedFields = BTreeMap<String, FieldChange>;

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: Option<i64>,
    pub actor: Option<ActorRef>,
    pub event: AuditEvent,
    pub subject: Option<SubjectRef>,
    pub old_values: Option<Map<String, Value>>,
    pub new_values: Option<Map<String, Value>>,
    pub changed_fields: ChangedFields,
    pub context: RequestContext,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}
