use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::{Cart as DomainCart, CartItem as DomainCartItem};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::carts)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(belongs_to(Cart, foreign_key = cart_id))]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub size: i32,
    pub quantity: i32,
    pub unit_price: i64,
    pub line_total: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::carts)]
pub struct NewCart {
    pub user_id: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem {
    pub cart_id: i32,
    pub product_id: i32,
    pub size: i32,
    pub quantity: i32,
    pub unit_price: i64,
    pub line_total: i64,
}

impl Cart {
    pub fn into_domain(self, items: Vec<CartItem>) -> DomainCart {
        DomainCart {
            id: self.id,
            user_id: self.user_id,
            items: items.into_iter().map(CartItem::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl CartItem {
    pub fn into_domain(self) -> DomainCartItem {
        DomainCartItem {
            id: self.id,
            product_id: self.product_id,
            size: self.size,
            quantity: self.quantity,
            unit_price: self.unit_price,
            line_total: self.line_total,
        }
    }
}

impl From<(Cart, Vec<CartItem>)> for DomainCart {
    fn from(value: (Cart, Vec<CartItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}
