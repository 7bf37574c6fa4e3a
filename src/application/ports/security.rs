// src/application/ports/security.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}

/// Issues and checks the opaque bearer tokens handed out at login. The
/// token itself carries no claims; the session row it resolves to is the
/// source of truth.
pub trait TokenCodec: Send + Sync {
    fn issue(&self) -> String;
    /// Cheap integrity check before the token is looked up in storage, so
    /// forged tokens never reach the database.
    fn verify(&self, token: &str) -> ApplicationResult<()>;
}
