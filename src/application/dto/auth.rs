// src/application/dto/auth.rs
use crate::domain::session::SessionId;
use crate::domain::user::{Role, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    pub session_id: i64,
}

/// The principal resolved from a bearer token: the user behind the active
/// session the token belongs to. Threaded explicitly through every call
/// that needs an actor; the core never consults ambient state.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub session_id: SessionId,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
