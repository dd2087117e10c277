use chrono::NaiveDateTime;
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::domain::product::{Gender, Product, ProductListQuery, SizeStock};
use crate::domain::review::Review;
use crate::forms::products::{AddProductForm, UpdateDiscountForm, UpdateSizesForm};
use crate::repository::{ProductReader, ProductWriter, ReviewReader};
use crate::services::{ServiceError, ServiceResult};

/// Number of products returned by the popular listing.
const POPULAR_LIMIT: i64 = 8;

/// View model for one product, with the derived fields the frontends expect.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub short: String,
    pub description: Option<String>,
    pub gender: Gender,
    pub base_price: i64,
    pub discount_rate: i32,
    /// Effective unit price, discount applied.
    pub sale_price: i64,
    pub sale_start: Option<NaiveDateTime>,
    pub sale_end: Option<NaiveDateTime>,
    pub sales_count: i64,
    /// Full per-size inventory, including sold-out sizes.
    pub sizes: Vec<SizeStock>,
    /// Sizes with stock left, derived from `sizes`.
    pub available_sizes: Vec<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let sale_price = product.sale_price();
        let available_sizes = product.available_sizes();

        Self {
            id: product.id,
            name: product.name,
            short: product.short,
            description: product.description,
            gender: product.gender,
            base_price: product.base_price,
            discount_rate: product.discount_rate,
            sale_price,
            sale_start: product.sale_start,
            sale_end: product.sale_end,
            sales_count: product.sales_count,
            sizes: product.sizes,
            available_sizes,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Product detail payload: the product plus its reviews.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: ProductView,
    pub reviews: Vec<Review>,
}

/// The whole catalog, newest first.
pub fn list_catalog<R>(repo: &R) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products(ProductListQuery::new())?;
    Ok(products.into_iter().map(ProductView::from).collect())
}

/// The best sellers, ranked by cumulative sales.
pub fn popular_products<R>(repo: &R) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new().best_selling().limit(POPULAR_LIMIT);
    let products = repo.list_products(query)?;
    Ok(products.into_iter().map(ProductView::from).collect())
}

/// One product together with its reviews.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<ProductDetail>
where
    R: ProductReader + ReviewReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;
    let reviews = repo.list_reviews(product_id)?;

    Ok(ProductDetail {
        product: ProductView::from(product),
        reviews,
    })
}

/// Creates a new product. Admin only.
pub fn create_product<R>(
    repo: &R,
    user: &CurrentUser,
    form: AddProductForm,
) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    if !user.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let payload = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_product(&payload)?;
    log::info!("Created product {} ({})", created.id, created.name);

    Ok(ProductView::from(created))
}

/// Replaces the per-size inventory of a product. Admin only.
pub fn update_product_sizes<R>(
    repo: &R,
    user: &CurrentUser,
    product_id: i32,
    form: UpdateSizesForm,
) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    if !user.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let sizes = form
        .into_entries()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo.replace_product_sizes(product_id, &sizes)?;
    Ok(ProductView::from(updated))
}

/// Updates the discount policy of a product. Admin only.
pub fn update_product_discount<R>(
    repo: &R,
    user: &CurrentUser,
    product_id: i32,
    form: UpdateDiscountForm,
) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    if !user.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo.update_product(product_id, &updates)?;
    Ok(ProductView::from(updated))
}

/// Deletes a product. Admin only. Existing order snapshots keep their copied
/// name and price.
pub fn delete_product<R>(repo: &R, user: &CurrentUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !user.is_admin() {
        return Err(ServiceError::Forbidden);
    }

    repo.delete_product(product_id)?;
    log::info!("Deleted product {product_id}");

    Ok(())
}
