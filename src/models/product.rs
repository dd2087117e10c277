use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, SizeStock,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub short: String,
    pub description: Option<String>,
    pub gender: String,
    pub base_price: i64,
    pub discount_rate: i32,
    pub sale_start: Option<NaiveDateTime>,
    pub sale_end: Option<NaiveDateTime>,
    pub sales_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_sizes)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
pub struct ProductSize {
    pub id: i32,
    pub product_id: i32,
    pub size: i32,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub short: &'a str,
    pub description: Option<&'a str>,
    pub gender: &'a str,
    pub base_price: i64,
    pub discount_rate: i32,
    pub sale_start: Option<NaiveDateTime>,
    pub sale_end: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_sizes)]
pub struct NewProductSize {
    pub product_id: i32,
    pub size: i32,
    pub stock: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub short: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub gender: Option<&'a str>,
    pub base_price: Option<i64>,
    pub discount_rate: Option<i32>,
    pub sale_start: Option<Option<NaiveDateTime>>,
    pub sale_end: Option<Option<NaiveDateTime>>,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn into_domain(self, sizes: Vec<ProductSize>) -> DomainProduct {
        DomainProduct {
            id: self.id,
            name: self.name,
            short: self.short,
            description: self.description,
            gender: self.gender.as_str().into(),
            base_price: self.base_price,
            discount_rate: self.discount_rate,
            sale_start: self.sale_start,
            sale_end: self.sale_end,
            sales_count: self.sales_count,
            sizes: sizes.into_iter().map(ProductSize::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl ProductSize {
    pub fn into_domain(self) -> SizeStock {
        SizeStock {
            size: self.size,
            stock: self.stock,
        }
    }
}

impl From<(Product, Vec<ProductSize>)> for DomainProduct {
    fn from(value: (Product, Vec<ProductSize>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            name: value.name.as_str(),
            short: value.short.as_str(),
            description: value.description.as_deref(),
            gender: value.gender.into(),
            base_price: value.base_price,
            discount_rate: value.discount_rate,
            sale_start: value.sale_start,
            sale_end: value.sale_end,
            updated_at: value.updated_at,
        }
    }
}

impl NewProductSize {
    pub fn from_domain(product_id: i32, value: &SizeStock) -> Self {
        Self {
            product_id,
            size: value.size,
            stock: value.stock,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            short: value.short.as_deref(),
            description: value
                .description
                .as_ref()
                .map(|description| description.as_deref()),
            gender: value.gender.map(|gender| gender.into()),
            base_price: value.base_price,
            discount_rate: value.discount_rate,
            sale_start: value.sale_start,
            sale_end: value.sale_end,
            updated_at: value.updated_at,
        }
    }
}
