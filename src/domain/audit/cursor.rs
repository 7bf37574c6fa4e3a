// src/domain/audit/cursor.rs
use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset pagination position over (timestamp, id) ordered listings.
/// Used for both the audit ledger and the session history, which share
/// the same descending created-at ordering.
#[derive(Debug, Clone)]
pub struct PageCursor {
    pub ts: DateTime<Utc>,
    pub id: i64,
}

impl PageCursor {
    pub fn new(ts: DateTime<Utc>, id: i64) -> Self {
        Self { ts, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.ts.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?;
        let raw = String::from_utf8(bytes)
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?;
        let (ts_s, id_s) = raw
            .split_once('|')
            .ok_or_else(|| DomainError::Validation("invalid cursor token".into()))?;
        let ts = DateTime::parse_from_rfc3339(ts_s)
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?
            .with_timezone(&Utc);
        let id = id_s
            .parse::<i64>()
            .map_err(|_| DomainError::Validation("invalid cursor token".into()))?;
        Ok(Self::new(ts, id))
    }
}
