use crate::schema::ValidationError;
use crate::store::StoreError;
use thiserror::Error;

/// Failure of a create/list operation. Every variant is reported to the
/// client as a 400 with the message as detail.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid request body: {0}")]
    Payload(String),
}
