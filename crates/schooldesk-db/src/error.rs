use schooldesk_core::AppError;
use thiserror::Error;

pub const USER_EXISTS: &str = "User already exists";
pub const ROLL_NUMBER_EXISTS: &str = "A student with this roll number already exists";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness rule was violated. Carries the client-facing message.
    #[error("{0}")]
    Conflict(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => AppError::conflict(message),
            other => AppError::internal(other),
        }
    }
}

/// Maps a unique violation on one of the known constraints to a conflict.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            match db_err.constraint() {
                Some("users_email_key") => return StoreError::Conflict(USER_EXISTS),
                Some("students_roll_number_key") => {
                    return StoreError::Conflict(ROLL_NUMBER_EXISTS);
                }
                _ => {}
            }
        }
    }
    StoreError::Database(err)
}
