//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls connecting them live here instead.

use crate::domain::types::TypeConstraintError;
use crate::forms::builds::SaveBuildFormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<SaveBuildFormError> for ServiceError {
    fn from(val: SaveBuildFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
