use crate::certificate::error::CertificateError;
use crate::database::error::DatabaseError;
use crate::notification::error::NotificationError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
    #[error("The certificate can't be produced: {0}")]
    Certificate(#[from] CertificateError),
    #[error("The certificate can't be sent: {0}")]
    Notification(#[from] NotificationError),
    #[error("Member {0} not found")]
    MemberNotFound(String),
}
