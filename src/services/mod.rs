use thiserror::Error;

use crate::repository::RepositoryError;

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod reviews;

/// Failures surfaced by service functions, mapped to HTTP statuses at the
/// route layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("admin role required")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Form(String),
    #[error("the selected size is not offered")]
    SizeNotOffered,
    #[error("the selected size is sold out")]
    SoldOut,
    #[error("insufficient stock, {available} left")]
    InsufficientStock { available: i32 },
    #[error("only purchased products can be reviewed")]
    NotPurchased,
    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
