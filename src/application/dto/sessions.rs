// src/application/dto/sessions.rs
use crate::domain::session::entity::{DeviceType, LoginMethod, LogoutReason, Session};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionDto {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[schema(value_type = String)]
    pub device_type: DeviceType,
    pub browser: String,
    pub platform: String,
    #[schema(value_type = String)]
    pub login_method: LoginMethod,
    #[serde(with = "serde_time")]
    pub login_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", skip_serializing_if = "Option::is_none")]
    pub logout_at: Option<DateTime<Utc>>,
    /// Seconds from login to logout, or to now for an active session.
    pub duration_secs: i64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub logout_reason: Option<LogoutReason>,
}

impl SessionDto {
    pub fn from_session(session: Session, now: DateTime<Utc>) -> Self {
        let duration_secs = session.duration(now).num_seconds();
        Self {
            id: session.id.into(),
            user_id: session.user_id.into(),
            ip: session.ip,
            device_type: session.device_type,
            browser: session.browser,
            platform: session.platform,
            login_method: session.login_method,
            login_at: session.login_at,
            logout_at: session.logout_at,
            duration_secs,
            is_active: session.logout_at.is_none(),
            logout_reason: session.logout_reason,
        }
    }
}
