use crate::database::error::DatabaseError;
use dto::api_response::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistrationError {
    #[error("The registration is invalid: {0:?}")]
    Invalid(FieldErrors),
    #[error("The member can't be stored: {0}")]
    Database(#[from] DatabaseError),
}

impl RegistrationError {
    pub fn invalid_field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_owned(), vec![message.to_owned()]);
        Self::Invalid(errors)
    }
}
