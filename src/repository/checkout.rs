use diesel::prelude::*;

use crate::{
    domain::order::Order as DomainOrder,
    domain::product::{ReserveOutcome, sale_price},
    models::cart::CartItem as DbCartItem,
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem,
    },
    models::product::Product as DbProduct,
    repository::{CheckoutError, CheckoutWriter, DieselRepository, cart, stock},
};

impl CheckoutWriter for DieselRepository {
    fn checkout(&self, user_id: i32) -> Result<DomainOrder, CheckoutError> {
        use crate::schema::{cart_items, order_items, orders, products};

        let mut conn = self.conn().map_err(CheckoutError::Repository)?;

        // One immediate (write) transaction for the whole conversion: either
        // every line is reserved and the order exists, or nothing changed.
        conn.immediate_transaction::<DomainOrder, CheckoutError, _>(|conn| {
            let Some(db_cart) = cart::find_cart_by_user(conn, user_id)? else {
                return Err(CheckoutError::EmptyCart);
            };

            let items = cart_items::table
                .filter(cart_items::cart_id.eq(db_cart.id))
                .order(cart_items::id.asc())
                .load::<DbCartItem>(conn)?;

            if items.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }

            for item in &items {
                if item.quantity < 1 || item.size <= 0 {
                    return Err(CheckoutError::InvalidCartItem);
                }
            }

            // Reserve every line. The first line that cannot be satisfied
            // aborts the transaction, undoing the decrements made so far.
            for item in &items {
                match stock::reserve_line(conn, item.product_id, item.size, item.quantity)? {
                    ReserveOutcome::Reserved { .. } => {}
                    _ => return Err(CheckoutError::OutOfStock),
                }
            }

            // Snapshot names and prices from product state read inside this
            // same transaction, not from the cart's display previews.
            let mut snapshots = Vec::with_capacity(items.len());
            let mut total_amount = 0i64;
            for item in &items {
                let product = products::table
                    .filter(products::id.eq(item.product_id))
                    .first::<DbProduct>(conn)
                    .optional()?
                    .ok_or(CheckoutError::InvalidCartItem)?;

                let unit_price = sale_price(product.base_price, product.discount_rate);
                let line_total = unit_price * i64::from(item.quantity);
                total_amount += line_total;

                snapshots.push((
                    product.name,
                    item.product_id,
                    item.size,
                    item.quantity,
                    unit_price,
                    line_total,
                ));
            }

            let now = chrono::Local::now().naive_utc();
            let created = diesel::insert_into(orders::table)
                .values(&DbNewOrder {
                    user_id,
                    total_amount,
                    paid_at: now,
                    updated_at: now,
                })
                .get_result::<DbOrder>(conn)?;

            let order_id = created.id;

            let payload: Vec<DbNewOrderItem<'_>> = snapshots
                .iter()
                .map(
                    |(name, product_id, size, quantity, unit_price, line_total)| DbNewOrderItem {
                        order_id,
                        product_id: Some(*product_id),
                        name_snapshot: name.as_str(),
                        size: *size,
                        quantity: *quantity,
                        unit_price: *unit_price,
                        line_total: *line_total,
                    },
                )
                .collect();

            diesel::insert_into(order_items::table)
                .values(&payload)
                .execute(conn)?;

            diesel::delete(cart_items::table.filter(cart_items::cart_id.eq(db_cart.id)))
                .execute(conn)?;

            let order_rows = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .order(order_items::id.asc())
                .load::<DbOrderItem>(conn)?;

            Ok(DomainOrder::from((created, order_rows)))
        })
    }
}
