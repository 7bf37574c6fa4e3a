// tests/support/mocks.rs
use async_trait::async_trait;
use campus_core::application::error::{ApplicationError, ApplicationResult};
use campus_core::application::ports::security::PasswordHasher;
use campus_core::domain::audit::cursor::PageCursor;
use campus_core::domain::audit::entity::AuditEntry;
use campus_core::domain::audit::repository::{
    AuditEntryRepository, AuditFilter, DailyActorCount, EventCount,
};
use campus_core::domain::errors::{DomainError, DomainResult};
use campus_core::domain::session::entity::{
    DeviceType, LoginMethod, LogoutReason, NewSession, Session, SessionId,
};
use campus_core::domain::session::repository::{SessionFilter, SessionRepository};
use campus_core::domain::user::{Email, NewUser, Role, User, UserId, UserRepository};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;

pub struct MockPasswordHasher;

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    inner: Mutex<UserStore>,
}

#[derive(Default)]
struct UserStore {
    users: Vec<User>,
    next_id: i64,
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut store = self.inner.lock().unwrap();
        if store
            .users
            .iter()
            .any(|u| u.email.as_str() == new_user.email.as_str())
        {
            return Err(DomainError::Conflict("email already exists".into()));
        }
        store.next_id += 1;
        let user = User {
            id: UserId::new(store.next_id)?,
            email: new_user.email,
            full_name: new_user.full_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        store.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| u.email.as_str() == email.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let store = self.inner.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }
}

/// Session store with the same contract as the Postgres repository: one
/// mutex guards each whole operation, which stands in for the per-user
/// transaction serialization.
#[derive(Default)]
pub struct InMemorySessionRepo {
    inner: Mutex<SessionStore>,
}

#[derive(Default)]
struct SessionStore {
    sessions: Vec<Session>,
    next_id: i64,
}

impl InMemorySessionRepo {
    pub fn sessions_for_user(&self, user_id: UserId) -> Vec<Session> {
        let store = self.inner.lock().unwrap();
        store
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect()
    }

    fn materialize(store: &mut SessionStore, new: NewSession) -> DomainResult<Session> {
        if store
            .sessions
            .iter()
            .any(|s| s.user_id == new.user_id && s.is_active())
        {
            return Err(DomainError::Conflict(
                "user already has an active session".into(),
            ));
        }
        store.next_id += 1;
        let session = Session {
            id: SessionId::new(store.next_id)?,
            session_token: new.session_token,
            user_id: new.user_id,
            ip: new.ip,
            user_agent: new.user_agent,
            device_type: new.device.device_type,
            browser: new.device.browser,
            platform: new.device.platform,
            login_method: new.login_method,
            login_at: new.login_at,
            logout_at: None,
            logout_reason: None,
        };
        store.sessions.push(session.clone());
        Ok(session)
    }

    fn end_all_for_user(
        store: &mut SessionStore,
        user_id: UserId,
        reason: LogoutReason,
        at: DateTime<Utc>,
    ) -> u64 {
        let mut count = 0;
        for session in store
            .sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.is_active())
        {
            session.logout_at = Some(at);
            session.logout_reason = Some(reason);
            count += 1;
        }
        count
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepo {
    async fn insert(&self, session: NewSession) -> DomainResult<Session> {
        let mut store = self.inner.lock().unwrap();
        Self::materialize(&mut store, session)
    }

    async fn supersede_and_start(
        &self,
        session: NewSession,
        reason: LogoutReason,
    ) -> DomainResult<(u64, Session)> {
        let mut store = self.inner.lock().unwrap();
        let superseded =
            Self::end_all_for_user(&mut store, session.user_id, reason, session.login_at);
        let session = Self::materialize(&mut store, session)?;
        Ok((superseded, session))
    }

    async fn end_user_sessions(
        &self,
        user_id: UserId,
        reason: LogoutReason,
        at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let mut store = self.inner.lock().unwrap();
        Ok(Self::end_all_for_user(&mut store, user_id, reason, at))
    }

    async fn end_session(
        &self,
        id: SessionId,
        reason: LogoutReason,
        at: DateTime<Utc>,
    ) -> DomainResult<Session> {
        let mut store = self.inner.lock().unwrap();
        let session = store
            .sessions
            .iter_mut()
            .find(|s| s.id == id && s.is_active())
            .ok_or_else(|| {
                DomainError::NotFound(format!("session {id} not found or already ended"))
            })?;
        session.logout_at = Some(at);
        session.logout_reason = Some(reason);
        Ok(session.clone())
    }

    async fn find_by_id(&self, id: SessionId) -> DomainResult<Option<Session>> {
        let store = self.inner.lock().unwrap();
        Ok(store.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_active_by_token(&self, token: &str) -> DomainResult<Option<Session>> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .sessions
            .iter()
            .find(|s| s.session_token == token && s.is_active())
            .cloned())
    }

    async fn count_active(&self) -> DomainResult<u64> {
        let store = self.inner.lock().unwrap();
        Ok(store.sessions.iter().filter(|s| s.is_active()).count() as u64)
    }

    async fn list(
        &self,
        filter: &SessionFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Session>, Option<String>)> {
        let store = self.inner.lock().unwrap();
        let mut matches: Vec<Session> = store
            .sessions
            .iter()
            .filter(|s| {
                filter.user_id.is_none_or(|id| i64::from(s.user_id) == id)
                    && filter.active.is_none_or(|active| s.is_active() == active)
                    && filter.from.is_none_or(|from| s.login_at >= from)
                    && filter.to.is_none_or(|to| s.login_at <= to)
                    && cursor
                        .as_ref()
                        .is_none_or(|c| (s.login_at, i64::from(s.id)) < (c.ts, c.id))
            })
            .cloned()
            .collect();
        matches.sort_by_key(|s| std::cmp::Reverse((s.login_at, i64::from(s.id))));

        let next_cursor = if matches.len() > limit as usize {
            matches.truncate(limit as usize);
            matches
                .last()
                .map(|s| PageCursor::new(s.login_at, s.id.into()).encode())
        } else {
            None
        };
        Ok((matches, next_cursor))
    }

    async fn count_by_device(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<(DeviceType, u64)>> {
        let store = self.inner.lock().unwrap();
        let mut counts: BTreeMap<&'static str, (DeviceType, u64)> = BTreeMap::new();
        for session in store.sessions.iter().filter(|s| in_range(s, from, to)) {
            counts
                .entry(session.device_type.as_str())
                .or_insert((session.device_type, 0))
                .1 += 1;
        }
        Ok(counts.into_values().collect())
    }

    async fn count_by_login_method(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<(LoginMethod, u64)>> {
        let store = self.inner.lock().unwrap();
        let mut counts: BTreeMap<&'static str, (LoginMethod, u64)> = BTreeMap::new();
        for session in store.sessions.iter().filter(|s| in_range(s, from, to)) {
            counts
                .entry(session.login_method.as_str())
                .or_insert((session.login_method, 0))
                .1 += 1;
        }
        Ok(counts.into_values().collect())
    }
}

fn in_range(session: &Session, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> bool {
    from.is_none_or(|from| session.login_at >= from) && to.is_none_or(|to| session.login_at <= to)
}

#[derive(Default)]
pub struct InMemoryAuditRepo {
    inner: Mutex<AuditStore>,
}

#[derive(Default)]
struct AuditStore {
    entries: Vec<AuditEntry>,
    next_id: i64,
}

impl InMemoryAuditRepo {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.inner.lock().unwrap().entries.clone()
    }
}

#[async_trait]
impl AuditEntryRepository for InMemoryAuditRepo {
    async fn insert(&self, mut entry: AuditEntry) -> DomainResult<AuditEntry> {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        entry.id = Some(store.next_id);
        entry.created_at = Some(Utc::now());
        store.entries.push(entry.clone());
        Ok(entry)
    }

    async fn list(
        &self,
        filter: &AuditFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<AuditEntry>, Option<String>)> {
        let store = self.inner.lock().unwrap();
        let mut matches: Vec<AuditEntry> = store
            .entries
            .iter()
            .filter(|e| {
                filter.actor_id.is_none_or(|id| {
                    e.actor
                        .and_then(|a| a.user_id())
                        .is_some_and(|uid| i64::from(uid) == id)
                }) && filter.event.is_none_or(|event| e.event == event)
                    && filter
                        .subject_type
                        .as_deref()
                        .is_none_or(|t| e.subject.as_ref().is_some_and(|s| s.kind == t))
                    && filter
                        .from
                        .is_none_or(|from| e.created_at.is_some_and(|at| at >= from))
                    && filter
                        .to
                        .is_none_or(|to| e.created_at.is_some_and(|at| at <= to))
                    && filter.search.as_deref().is_none_or(|q| {
                        e.context.ip.as_deref().is_some_and(|ip| ip.contains(q))
                            || e.context.url.as_deref().is_some_and(|url| url.contains(q))
                    })
                    && cursor.as_ref().is_none_or(|c| {
                        (e.created_at.unwrap_or_default(), e.id.unwrap_or_default())
                            < (c.ts, c.id)
                    })
            })
            .cloned()
            .collect();
        matches.sort_by_key(|e| {
            std::cmp::Reverse((e.created_at.unwrap_or_default(), e.id.unwrap_or_default()))
        });

        let next_cursor = if matches.len() > limit as usize {
            matches.truncate(limit as usize);
            matches.last().and_then(|e| {
                e.created_at
                    .zip(e.id)
                    .map(|(ts, id)| PageCursor::new(ts, id).encode())
            })
        } else {
            None
        };
        Ok((matches, next_cursor))
    }

    async fn count_by_event(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<EventCount>> {
        let store = self.inner.lock().unwrap();
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for entry in store.entries.iter().filter(|e| entry_in_range(e, from, to)) {
            *counts.entry(entry.event.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(event, count)| EventCount { event, count })
            .collect())
    }

    async fn distinct_actors_per_day(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<DailyActorCount>> {
        let store = self.inner.lock().unwrap();
        let mut days: BTreeMap<chrono::NaiveDate, std::collections::BTreeSet<i64>> =
            BTreeMap::new();
        for entry in store.entries.iter().filter(|e| entry_in_range(e, from, to)) {
            if let (Some(actor_id), Some(at)) =
                (entry.actor.and_then(|a| a.user_id()), entry.created_at)
            {
                days.entry(at.date_naive())
                    .or_default()
                    .insert(actor_id.into());
            }
        }
        Ok(days
            .into_iter()
            .map(|(day, actors)| DailyActorCount {
                day,
                actors: actors.len() as u64,
            })
            .collect())
    }
}

fn entry_in_range(
    entry: &AuditEntry,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    let Some(at) = entry.created_at else {
        return false;
    };
    from.is_none_or(|from| at >= from) && to.is_none_or(|to| at <= to)
}

/// Audit repository whose writes always fail, for exercising the
/// escalation path on the login flow.
pub struct FailingAuditRepo;

#[async_trait]
impl AuditEntryRepository for FailingAuditRepo {
    async fn insert(&self, _entry: AuditEntry) -> DomainResult<AuditEntry> {
        Err(DomainError::Persistence("audit store unavailable".into()))
    }

    async fn list(
        &self,
        _filter: &AuditFilter,
        _limit: u32,
        _cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<AuditEntry>, Option<String>)> {
        Err(DomainError::Persistence("audit store unavailable".into()))
    }

    async fn count_by_event(
        &self,
        _from: Option<DateTime<Utc>>,
        _to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<EventCount>> {
        Err(DomainError::Persistence("audit store unavailable".into()))
    }

    async fn distinct_actors_per_day(
        &self,
        _from: Option<DateTime<Utc>>,
        _to: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<DailyActorCount>> {
        Err(DomainError::Persistence("audit store unavailable".into()))
    }
}

pub fn seed_user(id_hint: &str, role: Role) -> NewUser {
    NewUser {
        email: Email::new(format!("{id_hint}@school.example")).unwrap(),
        full_name: format!("{id_hint} user"),
        password_hash: format!("hashed:{id_hint}-pw"),
        role,
        is_active: true,
        created_at: Utc::now(),
    }
}
