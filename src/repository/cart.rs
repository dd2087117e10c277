use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::cart::Cart as DomainCart,
    domain::product::sale_price,
    models::cart::{Cart as DbCart, CartItem as DbCartItem, NewCart as DbNewCart, NewCartItem as DbNewCartItem},
    repository::{CartReader, CartWriter, DieselRepository, RepositoryError, RepositoryResult},
};

impl CartReader for DieselRepository {
    fn get_cart(&self, user_id: i32) -> RepositoryResult<Option<DomainCart>> {
        let mut conn = self.conn()?;

        let Some(db_cart) = find_cart_by_user(&mut conn, user_id)? else {
            return Ok(None);
        };

        Ok(Some(load_cart(&mut conn, db_cart)?))
    }
}

impl CartWriter for DieselRepository {
    fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<DomainCart> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainCart, RepositoryError, _>(|conn| {
            let db_cart = ensure_cart(conn, user_id)?;
            load_cart(conn, db_cart)
        })
    }

    fn set_cart_line(
        &self,
        user_id: i32,
        product_id: i32,
        size: i32,
        quantity: i32,
    ) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCart, RepositoryError, _>(|conn| {
            let db_cart = ensure_cart(conn, user_id)?;

            let target = cart_items::table
                .filter(cart_items::cart_id.eq(db_cart.id))
                .filter(cart_items::product_id.eq(product_id))
                .filter(cart_items::size.eq(size));

            if quantity <= 0 {
                diesel::delete(target).execute(conn)?;
            } else {
                let updated = diesel::update(target)
                    .set((
                        cart_items::quantity.eq(quantity),
                        cart_items::updated_at.eq(chrono::Local::now().naive_utc()),
                    ))
                    .execute(conn)?;

                if updated == 0 {
                    // Prices are filled in by the refresh pass below.
                    diesel::insert_into(cart_items::table)
                        .values(&DbNewCartItem {
                            cart_id: db_cart.id,
                            product_id,
                            size,
                            quantity,
                            unit_price: 0,
                            line_total: 0,
                        })
                        .execute(conn)?;
                }
            }

            refresh_cart_prices(conn, db_cart.id)?;
            let db_cart = touch_cart(conn, db_cart.id)?;
            load_cart(conn, db_cart)
        })
    }

    fn remove_cart_line(&self, user_id: i32, item_id: i32) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCart, RepositoryError, _>(|conn| {
            let Some(db_cart) = find_cart_by_user(conn, user_id)? else {
                return Err(RepositoryError::NotFound);
            };

            let deleted = diesel::delete(
                cart_items::table
                    .filter(cart_items::cart_id.eq(db_cart.id))
                    .filter(cart_items::id.eq(item_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            refresh_cart_prices(conn, db_cart.id)?;
            let db_cart = touch_cart(conn, db_cart.id)?;
            load_cart(conn, db_cart)
        })
    }

    fn clear_cart(&self, user_id: i32) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCart, RepositoryError, _>(|conn| {
            let db_cart = ensure_cart(conn, user_id)?;

            diesel::delete(cart_items::table.filter(cart_items::cart_id.eq(db_cart.id)))
                .execute(conn)?;

            let db_cart = touch_cart(conn, db_cart.id)?;
            load_cart(conn, db_cart)
        })
    }
}

pub(crate) fn find_cart_by_user(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> RepositoryResult<Option<DbCart>> {
    use crate::schema::carts;

    Ok(carts::table
        .filter(carts::user_id.eq(user_id))
        .first::<DbCart>(conn)
        .optional()?)
}

fn ensure_cart(conn: &mut SqliteConnection, user_id: i32) -> RepositoryResult<DbCart> {
    use crate::schema::carts;

    if let Some(existing) = find_cart_by_user(conn, user_id)? {
        return Ok(existing);
    }

    let created = diesel::insert_into(carts::table)
        .values(&DbNewCart {
            user_id,
            updated_at: chrono::Local::now().naive_utc(),
        })
        .get_result::<DbCart>(conn)?;

    Ok(created)
}

fn touch_cart(conn: &mut SqliteConnection, cart_id: i32) -> RepositoryResult<DbCart> {
    use crate::schema::carts;

    Ok(
        diesel::update(carts::table.filter(carts::id.eq(cart_id)))
            .set(carts::updated_at.eq(chrono::Local::now().naive_utc()))
            .get_result::<DbCart>(conn)?,
    )
}

fn load_cart(conn: &mut SqliteConnection, db_cart: DbCart) -> RepositoryResult<DomainCart> {
    use crate::schema::cart_items;

    let items = cart_items::table
        .filter(cart_items::cart_id.eq(db_cart.id))
        .order(cart_items::id.asc())
        .load::<DbCartItem>(conn)?;

    Ok(DomainCart::from((db_cart, items)))
}

/// Recompute every line's `unit_price`/`line_total` preview from the current
/// product state. Runs after each cart mutation so price edits reflow into
/// the cart view; the checkout transaction snapshots prices independently.
fn refresh_cart_prices(conn: &mut SqliteConnection, cart_id: i32) -> RepositoryResult<()> {
    use crate::schema::{cart_items, products};

    let items = cart_items::table
        .filter(cart_items::cart_id.eq(cart_id))
        .load::<DbCartItem>(conn)?;

    for item in items {
        let (base_price, discount_rate) = products::table
            .filter(products::id.eq(item.product_id))
            .select((products::base_price, products::discount_rate))
            .first::<(i64, i32)>(conn)?;

        let unit_price = sale_price(base_price, discount_rate);
        let line_total = unit_price * i64::from(item.quantity);

        if unit_price != item.unit_price || line_total != item.line_total {
            diesel::update(cart_items::table.filter(cart_items::id.eq(item.id)))
                .set((
                    cart_items::unit_price.eq(unit_price),
                    cart_items::line_total.eq(line_total),
                ))
                .execute(conn)?;
        }
    }

    Ok(())
}
