// src/application/queries/audit/common.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};

pub(crate) fn ensure_admin(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(
            "administrator role required",
        ))
    }
}

pub(crate) fn normalize_limit(limit: u32) -> u32 {
    const DEFAULT_LIMIT: u32 = 20;
    const MAX_LIMIT: u32 = 100;

    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}
