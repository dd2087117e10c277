use mockall::mock;

use super::{
    CartReader, CartWriter, CheckoutError, CheckoutWriter, OrderReader, ProductReader,
    ProductWriter, RepositoryResult, ReviewReader, ReviewWriter, StockWriter,
};
use crate::domain::{
    cart::Cart,
    order::Order,
    product::{
        NewProduct, Product, ProductListQuery, ReserveOutcome, SizeAvailability, SizeStock,
        UpdateProduct,
    },
    review::{NewReview, Review},
};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
        fn get_size_stock(&self, product_id: i32, size: i32) -> RepositoryResult<SizeAvailability>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn replace_product_sizes(&self, product_id: i32, sizes: &[SizeStock]) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub StockWriter {}

    impl StockWriter for StockWriter {
        fn reserve_stock(&self, product_id: i32, size: i32, quantity: i32) -> RepositoryResult<ReserveOutcome>;
    }
}

mock! {
    pub CartReader {}

    impl CartReader for CartReader {
        fn get_cart(&self, user_id: i32) -> RepositoryResult<Option<Cart>>;
    }
}

mock! {
    pub CartWriter {}

    impl CartWriter for CartWriter {
        fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
        fn set_cart_line(&self, user_id: i32, product_id: i32, size: i32, quantity: i32) -> RepositoryResult<Cart>;
        fn remove_cart_line(&self, user_id: i32, item_id: i32) -> RepositoryResult<Cart>;
        fn clear_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, user_id: i32) -> RepositoryResult<Vec<Order>>;
        fn user_has_purchased(&self, user_id: i32, product_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub CheckoutWriter {}

    impl CheckoutWriter for CheckoutWriter {
        fn checkout(&self, user_id: i32) -> Result<Order, CheckoutError>;
    }
}

mock! {
    pub ReviewReader {}

    impl ReviewReader for ReviewReader {
        fn list_reviews(&self, product_id: i32) -> RepositoryResult<Vec<Review>>;
    }
}

mock! {
    pub ReviewWriter {}

    impl ReviewWriter for ReviewWriter {
        fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
    }
}
