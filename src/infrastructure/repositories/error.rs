use crate::domain::errors::DomainError;

const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_SESSION_TOKEN: &str = "sessions_session_token_key";
const CNT_SESSION_USER: &str = "sessions_user_id_fkey";
const CNT_ONE_ACTIVE_SESSION: &str = "uq_sessions_one_active_per_user";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_EMAIL => DomainError::Conflict("email already exists".into()),
                    CNT_SESSION_TOKEN => {
                        DomainError::Conflict("session token already exists".into())
                    }
                    CNT_ONE_ACTIVE_SESSION => {
                        DomainError::Conflict("user already has an active session".into())
                    }
                    CNT_SESSION_USER => DomainError::NotFound("user not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
