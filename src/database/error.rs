use crate::database::error::DatabaseError::UnderlyingDatabase;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatabaseError {
    #[error("The --database-url argument is missing.")]
    MissingDatabaseUrl,
    #[error("The connection to the database failed.")]
    ConnectionFailed,
    #[error("The value of column `{0}` is already used by another record.")]
    UniqueViolation(String),
    #[error("A stored value can't be read back: {0}")]
    CorruptedValue(String),
    #[error("An error occurred within the database.")]
    UnderlyingDatabase(String),
}

impl From<Box<dyn Error + Send + Sync + 'static>> for DatabaseError {
    fn from(value: Box<dyn Error + Send + Sync + 'static>) -> Self {
        UnderlyingDatabase(value.to_string())
    }
}

impl From<diesel::result::Error> for DatabaseError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => DatabaseError::UniqueViolation(violated_column(info.message())),
            error => UnderlyingDatabase(error.to_string()),
        }
    }
}

impl From<r2d2::Error> for DatabaseError {
    fn from(_: r2d2::Error) -> Self {
        DatabaseError::ConnectionFailed
    }
}

impl From<chrono::ParseError> for DatabaseError {
    fn from(value: chrono::ParseError) -> Self {
        DatabaseError::CorruptedValue(value.to_string())
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(value: serde_json::Error) -> Self {
        DatabaseError::CorruptedValue(value.to_string())
    }
}

/// SQLite reports violations as `UNIQUE constraint failed: member.email`.
fn violated_column(message: &str) -> String {
    message
        .rsplit(['.', ' '])
        .next()
        .unwrap_or(message)
        .to_owned()
}
