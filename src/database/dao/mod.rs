use crate::database::error::DatabaseError;

pub mod member;

type Result<T, E = DatabaseError> = std::result::Result<T, E>;
