/// Error types for the social core
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("you can not follow yourself")]
    SelfFollow,

    #[error("you already follow this user")]
    AlreadyFollowing,

    #[error("you do not follow this user")]
    NotFollowing,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
