use thiserror::Error;

/// Failures surfaced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::NotFound => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure kinds of the checkout transaction.
///
/// Any of these aborts the whole transaction: stock decremented for earlier
/// cart lines is rolled back and no order row exists afterwards.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart does not exist or has no lines. No mutation was attempted.
    #[error("cart is empty")]
    EmptyCart,
    /// A cart line is malformed or refers to a vanished product.
    #[error("cart contains an invalid item")]
    InvalidCartItem,
    /// At least one line could not be reserved against current stock.
    #[error("insufficient stock for one or more cart items")]
    OutOfStock,
    /// Storage failure; the transaction was rolled back.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<diesel::result::Error> for CheckoutError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Repository(RepositoryError::from(value))
    }
}
