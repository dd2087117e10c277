use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::product::ReserveOutcome,
    repository::{DieselRepository, RepositoryResult, StockWriter},
};

impl StockWriter for DieselRepository {
    fn reserve_stock(
        &self,
        product_id: i32,
        size: i32,
        quantity: i32,
    ) -> RepositoryResult<ReserveOutcome> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| reserve_line(conn, product_id, size, quantity))
    }
}

/// Reserve `quantity` units of `(product_id, size)` on an open connection.
///
/// The decrement is a single guarded `UPDATE ... WHERE stock >= quantity`, so
/// two concurrent reservations can never both consume the last unit; the
/// sales counter is bumped under the same transaction. Callers must run this
/// inside a write transaction and pass `quantity >= 1`.
pub(crate) fn reserve_line(
    conn: &mut SqliteConnection,
    product_id: i32,
    size: i32,
    quantity: i32,
) -> RepositoryResult<ReserveOutcome> {
    use crate::schema::{product_sizes, products};

    debug_assert!(quantity >= 1);

    let updated = diesel::update(
        product_sizes::table
            .filter(product_sizes::product_id.eq(product_id))
            .filter(product_sizes::size.eq(size))
            .filter(product_sizes::stock.ge(quantity)),
    )
    .set((
        product_sizes::stock.eq(product_sizes::stock - quantity),
        product_sizes::updated_at.eq(chrono::Local::now().naive_utc()),
    ))
    .execute(conn)?;

    if updated == 0 {
        // The guarded update matched nothing; find out why.
        let available = product_sizes::table
            .filter(product_sizes::product_id.eq(product_id))
            .filter(product_sizes::size.eq(size))
            .select(product_sizes::stock)
            .first::<i32>(conn)
            .optional()?;

        return Ok(match available {
            Some(available) => ReserveOutcome::Insufficient { available },
            None => {
                let product_exists = diesel::select(diesel::dsl::exists(
                    products::table.filter(products::id.eq(product_id)),
                ))
                .get_result::<bool>(conn)?;

                if product_exists {
                    ReserveOutcome::SizeNotOffered
                } else {
                    ReserveOutcome::ProductNotFound
                }
            }
        });
    }

    diesel::update(products::table.filter(products::id.eq(product_id)))
        .set(products::sales_count.eq(products::sales_count + i64::from(quantity)))
        .execute(conn)?;

    let remaining = product_sizes::table
        .filter(product_sizes::product_id.eq(product_id))
        .filter(product_sizes::size.eq(size))
        .select(product_sizes::stock)
        .first::<i32>(conn)?;

    Ok(ReserveOutcome::Reserved { remaining })
}
