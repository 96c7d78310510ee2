//! # Product Repository

use super::DbPool;
use crate::model::product::{Product, ProductFilter};
use crate::model::query::{count_query, page_query};

const TABLE: &str = "products";
const COLUMNS: &str =
    "id, admin_id, merchant_id, name, product_category, price, image_url, created_at";

pub struct ProductRepository;

impl ProductRepository {
    /// Insert a product. A missing merchant or owner surfaces as a foreign key violation.
    pub async fn insert(pool: &DbPool, product: &Product) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO products \
             (id, admin_id, merchant_id, name, name_search, product_category, price, image_url, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(product.id)
        .bind(product.admin_id)
        .bind(product.merchant_id)
        .bind(&product.name)
        .bind(product.name.to_lowercase())
        .bind(product.category.as_str())
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// One page of a merchant's products matching `filter`, plus the total match count.
    pub async fn find_page(
        pool: &DbPool,
        filter: &ProductFilter,
    ) -> Result<(Vec<Product>, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut page = page_query(TABLE, COLUMNS, filter);
        let products = page
            .build_query_as::<Product>()
            .fetch_all(&mut *tx)
            .await?;

        let mut count = count_query(TABLE, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((products, total))
    }
}
