// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{Email, NewUser, Role, User, UserId, UserRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    full_name: String,
    password_hash: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            email: Email::new(row.email)?,
            full_name: row.full_name,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role)?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, email, full_name, password_hash, role, is_active, created_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (email, full_name, password_hash, role, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(new_user.email.as_str().to_owned())
        .bind(new_user.full_name)
        .bind(new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.is_active)
        .bind(new_user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str().to_owned())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(TryInto::try_into).transpose()
    }
}
