use validator::Validate;

use crate::auth::CurrentUser;
use crate::domain::cart::Cart;
use crate::domain::product::SizeAvailability;
use crate::forms::cart::{AddCartItemForm, UpdateCartItemForm};
use crate::repository::{CartReader, CartWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Returns the user's cart, creating an empty one on first access.
pub fn get_cart<R>(repo: &R, user: &CurrentUser) -> ServiceResult<Cart>
where
    R: CartWriter + ?Sized,
{
    Ok(repo.get_or_create_cart(user.id)?)
}

/// Adds a `(product, size)` line to the cart, merging with an existing line
/// for the same pair.
///
/// The stock check here is a courtesy for the UI; whatever survives until
/// checkout is re-validated atomically there.
pub fn add_to_cart<R>(repo: &R, user: &CurrentUser, form: AddCartItemForm) -> ServiceResult<Cart>
where
    R: CartWriter + ProductReader + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let AddCartItemForm {
        product_id,
        size,
        quantity,
    } = form;

    let stock = match repo.get_size_stock(product_id, size)? {
        SizeAvailability::ProductNotFound => return Err(ServiceError::NotFound),
        SizeAvailability::SizeNotOffered => return Err(ServiceError::SizeNotOffered),
        SizeAvailability::Available { stock } => stock,
    };

    if stock <= 0 {
        return Err(ServiceError::SoldOut);
    }

    let cart = repo.get_or_create_cart(user.id)?;
    let current = cart
        .find_line(product_id, size)
        .map(|line| line.quantity)
        .unwrap_or(0);
    let requested = current + quantity;

    if requested > stock {
        return Err(ServiceError::InsufficientStock { available: stock });
    }

    Ok(repo.set_cart_line(user.id, product_id, size, requested)?)
}

/// Sets the quantity of an existing cart line; `quantity <= 0` removes it.
pub fn update_cart_item<R>(
    repo: &R,
    user: &CurrentUser,
    form: UpdateCartItemForm,
) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter + ProductReader + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let UpdateCartItemForm {
        product_id,
        size,
        quantity,
    } = form;

    let cart = repo.get_cart(user.id)?.ok_or(ServiceError::NotFound)?;
    if cart.find_line(product_id, size).is_none() {
        return Err(ServiceError::NotFound);
    }

    if quantity <= 0 {
        return Ok(repo.set_cart_line(user.id, product_id, size, 0)?);
    }

    match repo.get_size_stock(product_id, size)? {
        SizeAvailability::ProductNotFound => return Err(ServiceError::NotFound),
        SizeAvailability::SizeNotOffered => return Err(ServiceError::SizeNotOffered),
        SizeAvailability::Available { stock } if quantity > stock => {
            return Err(ServiceError::InsufficientStock { available: stock });
        }
        SizeAvailability::Available { .. } => {}
    }

    Ok(repo.set_cart_line(user.id, product_id, size, quantity)?)
}

/// Removes a single line by its id.
pub fn remove_cart_item<R>(repo: &R, user: &CurrentUser, item_id: i32) -> ServiceResult<Cart>
where
    R: CartWriter + ?Sized,
{
    Ok(repo.remove_cart_line(user.id, item_id)?)
}

/// Empties the cart.
pub fn clear_cart<R>(repo: &R, user: &CurrentUser) -> ServiceResult<Cart>
where
    R: CartWriter + ?Sized,
{
    Ok(repo.clear_cart(user.id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::auth::Role;
    use crate::domain::cart::CartItem;
    use crate::repository::RepositoryResult;
    use crate::repository::mock::{MockCartReader, MockCartWriter, MockProductReader};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn customer() -> CurrentUser {
        CurrentUser {
            id: 7,
            name: "Jamie".to_string(),
            role: Role::Customer,
        }
    }

    fn cart_with_items(user_id: i32, items: Vec<CartItem>) -> Cart {
        Cart {
            id: 1,
            user_id,
            items,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn line(product_id: i32, size: i32, quantity: i32) -> CartItem {
        CartItem {
            id: 10,
            product_id,
            size,
            quantity,
            unit_price: 8000,
            line_total: 8000 * i64::from(quantity),
        }
    }

    struct FakeRepo {
        cart_reader: MockCartReader,
        cart_writer: MockCartWriter,
        product_reader: MockProductReader,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                cart_reader: MockCartReader::new(),
                cart_writer: MockCartWriter::new(),
                product_reader: MockProductReader::new(),
            }
        }
    }

    impl CartReader for FakeRepo {
        fn get_cart(&self, user_id: i32) -> RepositoryResult<Option<Cart>> {
            self.cart_reader.get_cart(user_id)
        }
    }

    impl CartWriter for FakeRepo {
        fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<Cart> {
            self.cart_writer.get_or_create_cart(user_id)
        }

        fn set_cart_line(
            &self,
            user_id: i32,
            product_id: i32,
            size: i32,
            quantity: i32,
        ) -> RepositoryResult<Cart> {
            self.cart_writer
                .set_cart_line(user_id, product_id, size, quantity)
        }

        fn remove_cart_line(&self, user_id: i32, item_id: i32) -> RepositoryResult<Cart> {
            self.cart_writer.remove_cart_line(user_id, item_id)
        }

        fn clear_cart(&self, user_id: i32) -> RepositoryResult<Cart> {
            self.cart_writer.clear_cart(user_id)
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(
            &self,
            id: i32,
        ) -> RepositoryResult<Option<crate::domain::product::Product>> {
            self.product_reader.get_product_by_id(id)
        }

        fn list_products(
            &self,
            query: crate::domain::product::ProductListQuery,
        ) -> RepositoryResult<Vec<crate::domain::product::Product>> {
            self.product_reader.list_products(query)
        }

        fn get_size_stock(
            &self,
            product_id: i32,
            size: i32,
        ) -> RepositoryResult<SizeAvailability> {
            self.product_reader.get_size_stock(product_id, size)
        }
    }

    #[test]
    fn add_to_cart_rejects_sold_out_size() {
        let mut repo = FakeRepo::new();
        let user = customer();

        repo.product_reader
            .expect_get_size_stock()
            .times(1)
            .returning(|_, _| Ok(SizeAvailability::Available { stock: 0 }));

        let form = AddCartItemForm {
            product_id: 1,
            size: 260,
            quantity: 1,
        };

        let result = add_to_cart(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::SoldOut)));
    }

    #[test]
    fn add_to_cart_rejects_unknown_size() {
        let mut repo = FakeRepo::new();
        let user = customer();

        repo.product_reader
            .expect_get_size_stock()
            .times(1)
            .returning(|_, _| Ok(SizeAvailability::SizeNotOffered));

        let form = AddCartItemForm {
            product_id: 1,
            size: 300,
            quantity: 1,
        };

        let result = add_to_cart(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::SizeNotOffered)));
    }

    #[test]
    fn add_to_cart_merges_with_existing_line() {
        let mut repo = FakeRepo::new();
        let user = customer();
        let user_id = user.id;

        repo.product_reader
            .expect_get_size_stock()
            .times(1)
            .returning(|_, _| Ok(SizeAvailability::Available { stock: 5 }));

        repo.cart_writer
            .expect_get_or_create_cart()
            .times(1)
            .returning(move |user_id| Ok(cart_with_items(user_id, vec![line(1, 260, 2)])));

        repo.cart_writer
            .expect_set_cart_line()
            .times(1)
            .withf(move |uid, product_id, size, quantity| {
                assert_eq!(*uid, user_id);
                assert_eq!(*product_id, 1);
                assert_eq!(*size, 260);
                assert_eq!(*quantity, 3); // 2 already in cart + 1 added
                true
            })
            .returning(move |user_id, _, _, _| {
                Ok(cart_with_items(user_id, vec![line(1, 260, 3)]))
            });

        let form = AddCartItemForm {
            product_id: 1,
            size: 260,
            quantity: 1,
        };

        let cart = add_to_cart(&repo, &user, form).expect("expected success");
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn add_to_cart_rejects_merged_quantity_beyond_stock() {
        let mut repo = FakeRepo::new();
        let user = customer();

        repo.product_reader
            .expect_get_size_stock()
            .times(1)
            .returning(|_, _| Ok(SizeAvailability::Available { stock: 2 }));

        repo.cart_writer
            .expect_get_or_create_cart()
            .times(1)
            .returning(move |user_id| Ok(cart_with_items(user_id, vec![line(1, 260, 2)])));

        let form = AddCartItemForm {
            product_id: 1,
            size: 260,
            quantity: 1,
        };

        let result = add_to_cart(&repo, &user, form);

        assert!(matches!(
            result,
            Err(ServiceError::InsufficientStock { available: 2 })
        ));
    }

    #[test]
    fn update_cart_item_requires_existing_line() {
        let mut repo = FakeRepo::new();
        let user = customer();

        repo.cart_reader
            .expect_get_cart()
            .times(1)
            .returning(move |user_id| Ok(Some(cart_with_items(user_id, Vec::new()))));

        let form = UpdateCartItemForm {
            product_id: 1,
            size: 260,
            quantity: 2,
        };

        let result = update_cart_item(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn update_cart_item_with_zero_quantity_removes_line() {
        let mut repo = FakeRepo::new();
        let user = customer();

        repo.cart_reader
            .expect_get_cart()
            .times(1)
            .returning(move |user_id| Ok(Some(cart_with_items(user_id, vec![line(1, 260, 2)]))));

        repo.cart_writer
            .expect_set_cart_line()
            .times(1)
            .withf(|_, _, _, quantity| *quantity == 0)
            .returning(move |user_id, _, _, _| Ok(cart_with_items(user_id, Vec::new())));

        let form = UpdateCartItemForm {
            product_id: 1,
            size: 260,
            quantity: 0,
        };

        let cart = update_cart_item(&repo, &user, form).expect("expected success");
        assert!(cart.is_empty());
    }
}
