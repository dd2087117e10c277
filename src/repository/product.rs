use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        ProductOrdering, SizeAvailability, SizeStock, UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, NewProductSize as DbNewProductSize, Product as DbProduct,
        ProductSize as DbProductSize, UpdateProduct as DbUpdateProduct,
    },
    repository::{
        DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult,
    },
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let Some(product) = product else {
            return Ok(None);
        };

        let mut sizes = load_sizes_for_products(&mut conn, &[product.id])?;
        let product_sizes = sizes.remove(&product.id).unwrap_or_default();

        Ok(Some(DomainProduct::from((product, product_sizes))))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        items = match query.ordering {
            ProductOrdering::Newest => items.order(products::created_at.desc()),
            ProductOrdering::BestSelling => {
                items.order((products::sales_count.desc(), products::created_at.desc()))
            }
        };

        if let Some(limit) = query.limit {
            items = items.limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        if db_products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut sizes_by_product = load_sizes_for_products(&mut conn, &product_ids)?;

        let products = db_products
            .into_iter()
            .map(|product| {
                let product_id = product.id;
                let sizes = sizes_by_product.remove(&product_id).unwrap_or_default();
                DomainProduct::from((product, sizes))
            })
            .collect();

        Ok(products)
    }

    fn get_size_stock(&self, product_id: i32, size: i32) -> RepositoryResult<SizeAvailability> {
        use crate::schema::{product_sizes, products};

        let mut conn = self.conn()?;

        let product_exists = diesel::select(diesel::dsl::exists(
            products::table.filter(products::id.eq(product_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        if !product_exists {
            return Ok(SizeAvailability::ProductNotFound);
        }

        let stock = product_sizes::table
            .filter(product_sizes::product_id.eq(product_id))
            .filter(product_sizes::size.eq(size))
            .select(product_sizes::stock)
            .first::<i32>(&mut conn)
            .optional()?;

        Ok(match stock {
            Some(stock) => SizeAvailability::Available { stock },
            None => SizeAvailability::SizeNotOffered,
        })
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_sizes, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_new = DbNewProduct::from(new_product);

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            let product_id = created.id;

            if !new_product.sizes.is_empty() {
                let payload: Vec<DbNewProductSize> = new_product
                    .sizes
                    .iter()
                    .map(|entry| DbNewProductSize::from_domain(product_id, entry))
                    .collect();

                diesel::insert_into(product_sizes::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let sizes = product_sizes::table
                .filter(product_sizes::product_id.eq(product_id))
                .order(product_sizes::size.asc())
                .load::<DbProductSize>(conn)?;

            Ok(DomainProduct::from((created, sizes)))
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_sizes, products};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        let sizes = product_sizes::table
            .filter(product_sizes::product_id.eq(product_id))
            .order(product_sizes::size.asc())
            .load::<DbProductSize>(&mut conn)?;

        Ok(DomainProduct::from((updated, sizes)))
    }

    fn replace_product_sizes(
        &self,
        product_id: i32,
        sizes: &[SizeStock],
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_sizes, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let exists = diesel::select(diesel::dsl::exists(
                products::table.filter(products::id.eq(product_id)),
            ))
            .get_result::<bool>(conn)?;
            if !exists {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(
                product_sizes::table.filter(product_sizes::product_id.eq(product_id)),
            )
            .execute(conn)?;

            if !sizes.is_empty() {
                let payload: Vec<DbNewProductSize> = sizes
                    .iter()
                    .map(|entry| DbNewProductSize::from_domain(product_id, entry))
                    .collect();

                diesel::insert_into(product_sizes::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let product = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(products::updated_at.eq(chrono::Local::now().naive_utc()))
                .get_result::<DbProduct>(conn)?;

            let rows = product_sizes::table
                .filter(product_sizes::product_id.eq(product_id))
                .order(product_sizes::size.asc())
                .load::<DbProductSize>(conn)?;

            Ok(DomainProduct::from((product, rows)))
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

pub(crate) fn load_sizes_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbProductSize>>> {
    use crate::schema::product_sizes;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_sizes::table
        .filter(product_sizes::product_id.eq_any(product_ids))
        .order(product_sizes::size.asc())
        .load::<DbProductSize>(conn)?;

    let mut map: HashMap<i32, Vec<DbProductSize>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row);
    }

    Ok(map)
}
