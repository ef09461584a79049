//! Request-level orchestration between routes and the repository.
//!
//! Services check the caller's role, resolve the tenant, and turn storage and
//! form failures into [`ServiceError`] values the routes know how to present.

use thiserror::Error;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{ClientId, OwnerId, TypeConstraintError};
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod client;
pub mod clients;
pub mod dashboard;
pub mod seed;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Invalid user input; the message is shown to the user as is.
    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        log::warn!("Rejected form: {err}");
        ServiceError::Form(form_error_message(&err).to_string())
    }
}

fn form_error_message(err: &FormError) -> &'static str {
    match err {
        FormError::Validation(errors) if errors.errors().contains_key("name") => {
            "Le nom du client est obligatoire."
        }
        FormError::Validation(errors) if errors.errors().contains_key("title") => {
            "Le titre de la tâche est obligatoire."
        }
        FormError::Validation(_) => "Formulaire invalide.",
        FormError::InvalidName => "Le nom du client est obligatoire.",
        FormError::InvalidTitle => "Le titre de la tâche est obligatoire.",
        FormError::InvalidDueDate => "Date d'échéance invalide (format AAAA-MM-JJ).",
        FormError::InvalidClientId => "Client invalide.",
        FormError::InvalidTaskId => "Tâche invalide.",
    }
}

pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Checks access and returns the tenant every storage call is scoped to.
pub fn tenant(user: &AuthenticatedUser) -> ServiceResult<OwnerId> {
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    user.owner_id().map_err(|err| {
        log::error!("Token for {} has no usable subject: {err}", user.email);
        ServiceError::Unauthorized
    })
}

/// Ids from the URL that cannot exist are reported as missing records.
pub(crate) fn client_id(raw: i32) -> ServiceResult<ClientId> {
    ClientId::new(raw).map_err(|_| ServiceError::NotFound)
}
