use crate::certificate::error::CertificateError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NotificationError {
    #[error("The email can't be rendered: {0}")]
    Template(String),
    #[error("The certificate can't be attached.")]
    Certificate(#[from] CertificateError),
    #[error("The email can't be sent.")]
    Email(#[from] crate::tools::email::Error),
}

impl From<tera::Error> for NotificationError {
    fn from(value: tera::Error) -> Self {
        NotificationError::Template(value.to_string())
    }
}
