// src/application/dto/users.rs
use crate::domain::user::{Role, User};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[schema(value_type = String)]
    pub role: Role,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.into(),
            full_name: user.full_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
