// src/infrastructure/repositories/postgres_session.rs
use super::map_sqlx;
use crate::domain::audit::cursor::PageCursor;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::session::entity::{
    DeviceType, LoginMethod, LogoutReason, NewSession, Session, SessionId,
};
use crate::domain::session::repository::{SessionFilter, SessionRepository};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const SELECT_COLUMNS: &str = "id, session_token, user_id, ip, user_agent, device_type, \
     browser, platform, login_method, login_at, logout_at, logout_reason";

#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    id: i64,
    session_token: String,
    user_id: i64,
    ip: Option<String>,
    user_agent: Option<String>,
    device_type: String,
    browser: String,
    platform: String,
    login_method: String,
    login_at: DateTime<Utc>,
    logout_at: Option<DateTime<Utc>>,
    logout_reason: Option<String>,
}

impl TryFrom<SessionRow> for Session {
    type Error = DomainError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(Session {
            id: SessionId::new(row.id)?,
            session_token: row.session_token,
            user_id: UserId::new(row.user_id)?,
            ip: row.ip,
            user_agent: row.user_agent,
            device_type: row.device_type.parse()?,
            browser: row.browser,
            platform: row.platform,
            login_method: row.login_method.parse()?,
            login_at: row.login_at,
            logout_at: row.logout_at,
            logout_reason: row.logout_reason.as_deref().map(str::parse).transpose()?,
        })
    }
}

const INSERT_SESSION: &str = "INSERT INTO sessions \
     (session_token, user_id, ip, user_agent, device_type, browser, platform, \
      login_method, login_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
     RETURNING id, session_token, user_id, ip, user_agent, device_type, browser, \
      platform, login_method, login_at, logout_at, logout_reason";

fn bind_new_session<'q>(
    query: sqlx::query::QueryAs<'q, Postgres, SessionRow, sqlx::postgres::PgArguments>,
    session: &NewSession,
) -> sqlx::query::QueryAs<'q, Postgres, SessionRow, sqlx::postgres::PgArguments> {
    query
        .bind(session.session_token.clone())
        .bind(i64::from(session.user_id))
        .bind(session.ip.clone())
        .bind(session.user_agent.clone())
        .bind(session.device.device_type.as_str())
        .bind(session.device.browser.clone())
        .bind(session.device.platform.clone())
        .bind(session.login_method.as_str())
        .bind(session.login_at)
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, session: NewSession) -> DomainResult<Session> {
        let row: SessionRow = bind_new_session(sqlx::query_as(INSERT_SESSION), &session)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.try_into()
    }

    async fn supersede_and_start(
        &self,
        session: NewSession,
        reason: LogoutReason,
    ) -> DomainResult<(u64, Session)> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Serialize the supersede+insert pair per user. The transaction
        // holding the lock commits (or rolls back) before the next login
        // for this user proceeds, so the partial unique index can never
        // see two concurrent inserts for one user.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(i64::from(session.user_id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let superseded = sqlx::query(
            "UPDATE sessions SET logout_at = $1, logout_reason = $2 \
             WHERE user_id = $3 AND logout_at IS NULL",
        )
        .bind(session.login_at)
        .bind(reason.as_str())
        .bind(i64::from(session.user_id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .rows_affected();

        let row: SessionRow = bind_new_session(sqlx::query_as(INSERT_SESSION), &session)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok((superseded, row.try_into()?))
    }

    async fn end_user_sessions(
        &self,
        user_id: UserId,
        reason: LogoutReason,
        at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET logout_at = $1, logout_reason = $2 \
             WHERE user_id = $3 AND logout_at IS NULL",
        )
        .bind(at)
        .bind(reason.as_str())
        .bind(i64::from(user_id))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }

    async fn end_session(
        &self,
        id: SessionId,
        reason: LogoutReason,
        at: DateTime<Utc>,
    ) -> DomainResult<Session> {
        let row: Option<SessionRow> = sqlx::query_as(&format!(
            "UPDATE sessions SET logout_at = $1, logout_reason = $2 \
             WHERE id = $3 AND logout_at IS NULL \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(at)
        .bind(reason.as_str())
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map_or_else(
            || {
                Err(DomainError::NotFound(format!(
                    "session {id} not found or already ended"
                )))
            },
            TryInto::try_into,
        )
    }

    async fn find_by_id(&self, id: SessionId) -> DomainResult<Option<Session>> {
        let row: Option<SessionRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM sessions WHERE id = $1"))
                .bind(i64::from(id))
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn find_active_by_token(&self, token: &str) -> DomainResult<Option<Session>> {
        let row: Option<SessionRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM sessions \
             WHERE session_token = $1 AND logout_at IS NULL"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn count_active(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sessions WHERE logout_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map(|count| count as u64)
            .map_err(map_sqlx)
    }

    async fn list(
        &self,
        filter: &SessionFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Session>, Option<String>)> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM sessions WHERE 1=1"));

        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ");
            builder.push_bind(user_id);
        }
        if let Some(active) = filter.active {
            builder.push(if active {
                " AND logout_at IS NULL"
            } else {
                " AND logout_at IS NOT NULL"
            });
        }
        if let Some(from) = filter.from {
            builder.push(" AND login_at >= ");
            builder.push_bind(from);
        }
        if let Some(to) = filter.to {
            builder.push(" AND login_at <= ");
            builder.push_bind(to);
        }
        if let Some(cursor) = cursor {
            builder.push(" AND (login_at, id) < (");
            builder.push_bind(cursor.ts);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
        builder.push(" ORDER BY login_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(limit) + 1);

        let rows: Vec<SessionRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut sessions = rows
            .into_iter()
            .map(Session::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = if sessions.len() > limit as usize {
            sessions.truncate(limit as usize);
            sessions
                .last()
                .map(|s| PageCursor::new(s.login_at, s.id.into()).encode())
        } else {
            None
        };

        Ok((sessions, next_cursor))
    }

    async fn count_by_device(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<(DeviceType, u64)>> {
        let rows: Vec<(String, i64)> = group_count(&self.pool, "device_type", from, to).await?;
        rows.into_iter()
            .map(|(key, count)| Ok((key.parse()?, count as u64)))
            .collect()
    }

    async fn count_by_login_method(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<(LoginMethod, u64)>> {
        let rows: Vec<(String, i64)> = group_count(&self.pool, "login_method", from, to).await?;
        rows.into_iter()
            .map(|(key, count)| Ok((key.parse()?, count as u64)))
            .collect()
    }
}

async fn group_count(
    pool: &PgPool,
    column: &str,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> DomainResult<Vec<(String, i64)>> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "SELECT {column}, COUNT(*) FROM sessions WHERE 1=1"
    ));
    if let Some(from) = from {
        builder.push(" AND login_at >= ");
        builder.push_bind(from);
    }
    if let Some(to) = to {
        builder.push(" AND login_at <= ");
        builder.push_bind(to);
    }
    builder.push(format!(" GROUP BY {column} ORDER BY COUNT(*) DESC"));

    builder
        .build_query_as()
        .fetch_all(pool)
        .await
        .map_err(map_sqlx)
}
