use thiserror::Error as ThisError;

/// Failures surfaced by [`crate::session::Session`] operations.
///
/// Checks run in a fixed order: authentication, then input validation, then the
/// ownership lookup. A row owned by someone else is reported exactly like a row
/// that does not exist.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Invalid seed data: {0}")]
    SeedData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    pub fn validation<D: std::fmt::Display>(d: D) -> Self {
        Error::Validation(d.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Error::Conflict(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Error::Conflict(db_err.message().to_string())
            }
            _ => Error::Database(e),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(e: validator::ValidationErrors) -> Self {
        Error::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = Error::not_found("Set", 42);
        assert_eq!(err.to_string(), "Set not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn row_not_found_stays_a_database_error() {
        let err = Error::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, Error::Database(sqlx::Error::RowNotFound)));
    }
}
