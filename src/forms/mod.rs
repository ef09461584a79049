//! Form definitions backing the CRM routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod clients;
pub mod tasks;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid task title")]
    InvalidTitle,

    #[error("invalid due date")]
    InvalidDueDate,

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid task id")]
    InvalidTaskId,
}
