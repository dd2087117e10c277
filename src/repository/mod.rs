use crate::db::{DbConnection, DbPool};
use crate::domain::cart::Cart;
use crate::domain::order::Order;
use crate::domain::product::{
    NewProduct, Product, ProductListQuery, ReserveOutcome, SizeAvailability, SizeStock,
    UpdateProduct,
};
use crate::domain::review::{NewReview, Review};

pub mod errors;

pub mod cart;
pub mod checkout;
pub mod order;
pub mod product;
pub mod review;
pub mod stock;

#[cfg(test)]
pub mod mock;

pub use errors::{CheckoutError, RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the catalog and the stock ledger.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    /// Best-effort stock lookup used when validating cart mutations. It does
    /// not reserve anything; checkout re-checks atomically.
    fn get_size_stock(&self, product_id: i32, size: i32) -> RepositoryResult<SizeAvailability>;
}

/// Write operations over catalog records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Replace the whole per-size inventory of a product.
    fn replace_product_sizes(
        &self,
        product_id: i32,
        sizes: &[SizeStock],
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Mutations against the stock ledger.
pub trait StockWriter {
    /// Atomically decrement stock for `(product_id, size)` by `quantity` if
    /// enough is left, bumping the product's sales counter in the same
    /// transaction. `quantity` must be at least 1.
    fn reserve_stock(
        &self,
        product_id: i32,
        size: i32,
        quantity: i32,
    ) -> RepositoryResult<ReserveOutcome>;
}

/// Read-only operations over carts.
pub trait CartReader {
    fn get_cart(&self, user_id: i32) -> RepositoryResult<Option<Cart>>;
}

/// Write operations over carts. Every mutation re-derives the line price
/// previews from current product state before returning the cart.
pub trait CartWriter {
    fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
    /// Insert or update the `(product_id, size)` line; `quantity <= 0`
    /// removes it.
    fn set_cart_line(
        &self,
        user_id: i32,
        product_id: i32,
        size: i32,
        quantity: i32,
    ) -> RepositoryResult<Cart>;
    fn remove_cart_line(&self, user_id: i32, item_id: i32) -> RepositoryResult<Cart>;
    fn clear_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
}

/// Read-only operations over the order ledger.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<Order>>;
    /// All orders of a user, most recently paid first.
    fn list_orders(&self, user_id: i32) -> RepositoryResult<Vec<Order>>;
    /// Whether any of the user's orders contains the product.
    fn user_has_purchased(&self, user_id: i32, product_id: i32) -> RepositoryResult<bool>;
}

/// The checkout transaction. Orders are only ever created through this; the
/// ledger has no update or delete operations.
pub trait CheckoutWriter {
    /// Convert the user's cart into an order: validate lines, reserve stock
    /// for every line, snapshot names and prices, persist the order and clear
    /// the cart, all inside one database transaction.
    fn checkout(&self, user_id: i32) -> Result<Order, CheckoutError>;
}

/// Read-only operations over reviews.
pub trait ReviewReader {
    fn list_reviews(&self, product_id: i32) -> RepositoryResult<Vec<Review>>;
}

/// Write operations over reviews.
pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
}
