use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is not allowed to access the resource.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Input failed validation; the message is safe to show to the user.
    #[error("{0}")]
    Form(String),
    /// The build contradicts the compatibility rules and cannot be saved.
    #[error("build is incompatible: {}", .0.join("; "))]
    Incompatible(Vec<String>),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
