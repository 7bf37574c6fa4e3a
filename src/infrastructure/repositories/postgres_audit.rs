// src/infrastructure/repositories/postgres_audit.rs
use super::map_sqlx;
use crate::domain::audit::cursor::PageCursor;
use crate::domain::audit::entity::{
    ActorRef, AuditEntry, AuditEvent, ChangedFields, RequestContext, SubjectRef,
};
use crate::domain::audit::repository::{
    AuditEntryRepository, AuditFilter, DailyActorCount, EventCount,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const SELECT_COLUMNS: &str = "id, actor_kind, actor_id, event, subject_type, subject_id, \
     old_values, new_values, changed_fields, url, ip, user_agent, tags, created_at";

#[derive(Clone)]
pub struct PostgresAuditEntryRepository {
    pool: PgPool,
}

impl PostgresAuditEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditEntryRow {
    id: i64,
    actor_kind: Option<String>,
    actor_id: Option<i64>,
    event: String,
    subject_type: Option<String>,
    subject_id: Option<i64>,
    old_values: Option<Value>,
    new_values: Option<Value>,
    changed_fields: Value,
    url: Option<String>,
    ip: Option<String>,
    user_agent: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditEntryRow> for AuditEntry {
    type Error = DomainError;

    fn try_from(row: AuditEntryRow) -> Result<Self, Self::Error> {
        let actor = match (row.actor_kind.as_deref(), row.actor_id) {
            (Some("user"), Some(id)) => Some(ActorRef::User(UserId::new(id)?)),
            (Some("system"), _) => Some(ActorRef::System),
            (None, _) => None,
            (Some(other), _) => {
                return Err(DomainError::Validation(format!(
                    "unknown actor kind '{other}'"
                )));
            }
        };

        let subject = match (row.subject_type, row.subject_id) {
            (Some(kind), Some(id)) => Some(SubjectRef::new(kind, id)),
            _ => None,
        };

        let changed_fields: ChangedFields = serde_json::from_value(row.changed_fields)
            .map_err(|err| DomainError::Persistence(format!("malformed changed_fields: {err}")))?;

        Ok(AuditEntry {
            id: Some(row.id),
            actor,
            event: row.event.parse()?,
            subject,
            old_values: row.old_values.and_then(into_object),
            new_values: row.new_values.and_then(into_object),
            changed_fields,
            context: RequestContext {
                url: row.url,
                ip: row.ip,
                user_agent: row.user_agent,
            },
            tags: row.tags,
            created_at: Some(row.created_at),
        })
    }
}

fn into_object(value: Value) -> Option<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn push_range(
    builder: &mut QueryBuilder<'_, Postgres>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) {
    if let Some(from) = from {
        builder.push(" AND created_at >= ");
        builder.push_bind(from);
    }
    if let Some(to) = to {
        builder.push(" AND created_at <= ");
        builder.push_bind(to);
    }
}

#[async_trait]
impl AuditEntryRepository for PostgresAuditEntryRepository {
    async fn insert(&self, entry: AuditEntry) -> DomainResult<AuditEntry> {
        let changed_fields = serde_json::to_value(&entry.changed_fields)
            .map_err(|err| DomainError::Persistence(err.to_string()))?;

        let row: AuditEntryRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO audit_entries
                (actor_kind, actor_id, event, subject_type, subject_id,
                 old_values, new_values, changed_fields, url, ip, user_agent, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(entry.actor.as_ref().map(|a| a.kind()))
        .bind(entry.actor.as_ref().and_then(|a| a.user_id()).map(i64::from))
        .bind(entry.event.as_str())
        .bind(entry.subject.as_ref().map(|s| s.kind.clone()))
        .bind(entry.subject.as_ref().map(|s| s.id))
        .bind(entry.old_values.map(Value::Object))
        .bind(entry.new_values.map(Value::Object))
        .bind(changed_fields)
        .bind(entry.context.url)
        .bind(entry.context.ip)
        .bind(entry.context.user_agent)
        .bind(entry.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.try_into()
    }

    async fn list(
        &self,
        filter: &AuditFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<AuditEntry>, Option<String>)> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM audit_entries WHERE 1=1"
        ));

        if let Some(actor_id) = filter.actor_id {
            builder.push(" AND actor_id = ");
            builder.push_bind(actor_id);
        }
        if let Some(event) = filter.event {
            builder.push(" AND event = ");
            builder.push_bind(event.as_str());
        }
        if let Some(subject_type) = &filter.subject_type {
            builder.push(" AND subject_type = ");
            builder.push_bind(subject_type.clone());
        }
        push_range(&mut builder, filter.from, filter.to);
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            builder.push(" AND (ip ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR url ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(cursor) = cursor {
            builder.push(" AND (created_at, id) < (");
            builder.push_bind(cursor.ts);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(limit) + 1);

        let rows: Vec<AuditEntryRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut entries = rows
            .into_iter()
            .map(AuditEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = if entries.len() > limit as usize {
            entries.truncate(limit as usize);
            entries.last().and_then(|entry| {
                entry
                    .created_at
                    .zip(entry.id)
                    .map(|(ts, id)| PageCursor::new(ts, id).encode())
            })
        } else {
            None
        };

        Ok((entries, next_cursor))
    }

    async fn count_by_event(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<EventCount>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT event, COUNT(*) FROM audit_entries WHERE 1=1");
        push_range(&mut builder, from, to);
        builder.push(" GROUP BY event ORDER BY COUNT(*) DESC");

        let rows: Vec<(String, i64)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .map(|(event, count)| EventCount {
                event,
                count: count as u64,
            })
            .collect())
    }

    async fn distinct_actors_per_day(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<DailyActorCount>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT created_at::date AS day, COUNT(DISTINCT actor_id) \
             FROM audit_entries WHERE actor_id IS NOT NULL",
        );
        push_range(&mut builder, from, to);
        builder.push(" GROUP BY day ORDER BY day");

        let rows: Vec<(NaiveDate, i64)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .map(|(day, actors)| DailyActorCount {
                day,
                actors: actors as u64,
            })
            .collect())
    }
}
