// src/domain/session/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::session::user_agent::ClientDevice;
use crate::domain::user::UserId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub i64);

impl SessionId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("session id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SessionId> for i64 {
    fn from(value: SessionId) -> Self {
        value.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    Bot,
    Unknown,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Bot => "bot",
            DeviceType::Unknown => "unknown",
        }
    }
}

impl FromStr for DeviceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(DeviceType::Desktop),
            "mobile" => Ok(DeviceType::Mobile),
            "tablet" => Ok(DeviceType::Tablet),
            "bot" => Ok(DeviceType::Bot),
            "unknown" => Ok(DeviceType::Unknown),
            other => Err(DomainError::Validation(format!(
                "unknown device type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMethod {
    WebSession,
    ApiToken,
}

impl LoginMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginMethod::WebSession => "web_session",
            LoginMethod::ApiToken => "api_token",
        }
    }
}

impl FromStr for LoginMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web_session" => Ok(LoginMethod::WebSession),
            "api_token" => Ok(LoginMethod::ApiToken),
            other => Err(DomainError::Validation(format!(
                "unknown login method '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutReason {
    NewLogin,
    UserLogout,
    AdminTerminate,
    Timeout,
}

impl LogoutReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoutReason::NewLogin => "new_login",
            LogoutReason::UserLogout => "user_logout",
            LogoutReason::AdminTerminate => "admin_terminate",
            LogoutReason::Timeout => "timeout",
        }
    }
}

impl FromStr for LogoutReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_login" => Ok(LogoutReason::NewLogin),
            "user_logout" => Ok(LogoutReason::UserLogout),
            "admin_terminate" => Ok(LogoutReason::AdminTerminate),
            "timeout" => Ok(LogoutReason::Timeout),
            other => Err(DomainError::Validation(format!(
                "unknown logout reason '{other}'"
            ))),
        }
    }
}

/// One authenticated client lifetime, from login to logout or supersession.
/// Ended sessions stay on record; nothing ever deletes a row.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub session_token: String,
    pub user_id: UserId,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: DeviceType,
    pub browser: String,
    pub platform: String,
    pub login_method: LoginMethod,
    pub login_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
    pub logout_reason: Option<LogoutReason>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.logout_at.is_none()
    }

    /// Elapsed time between login and logout, or login and `now` while the
    /// session is still active.
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.logout_at.unwrap_or(now) - self.login_at
    }
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub session_token: String,
    pub user_id: UserId,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub device: ClientDevice,
    pub login_method: LoginMethod,
    pub login_at: DateTime<Utc>,
}
