//! Objects related to reporting errors from this library

/// A list of error types that can occur within this library
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("can't insert the object, it already exists in the database with id = {}", .0)]
    InvalidInsertObjectAlreadyExists(i64),

    #[error("Database error: row not found")]
    DatabaseRowNotFound(#[source] sqlx::Error),

    #[error("Database error: foreign key constraint violated")]
    DatabaseForeignKeyViolation(#[source] sqlx::Error),

    #[error("Database error: unspecified")]
    DatabaseUnspecified(#[source] sqlx::Error),

    #[error(transparent)]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::RowNotFound => Self::DatabaseRowNotFound(value),
            sqlx::Error::Database(ref e) if e.is_foreign_key_violation() => {
                Self::DatabaseForeignKeyViolation(value)
            }
            _ => Self::DatabaseUnspecified(value),
        }
    }
}

/// A convenience type alias for a [Result] with [Error] as its error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
