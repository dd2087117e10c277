use std::collections::HashMap;

use diesel::prelude::*;

use crate::{
    domain::order::Order as DomainOrder,
    models::order::{Order as DbOrder, OrderItem as DbOrderItem},
    repository::{DieselRepository, OrderReader, RepositoryResult},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::user_id.eq(user_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let order_id = order.id;

        let items = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn list_orders(&self, user_id: i32) -> RepositoryResult<Vec<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let db_orders = orders::table
            .filter(orders::user_id.eq(user_id))
            .order(orders::paid_at.desc())
            .load::<DbOrder>(&mut conn)?;

        if db_orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();
        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let order_id = order.id;
                let items = items_by_order.remove(&order_id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok(orders)
    }

    fn user_has_purchased(&self, user_id: i32, product_id: i32) -> RepositoryResult<bool> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let purchased = diesel::select(diesel::dsl::exists(
            orders::table
                .inner_join(order_items::table)
                .filter(orders::user_id.eq(user_id))
                .filter(order_items::product_id.eq(Some(product_id))),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(purchased)
    }
}
