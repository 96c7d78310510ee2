//! # Merchant Repository

use super::DbPool;
use crate::model::merchant::{Merchant, MerchantFilter};
use crate::model::query::{count_query, page_query};

const TABLE: &str = "merchants";
const COLUMNS: &str =
    "id, admin_id, name, merchant_category, image_url, latitude, longitude, created_at";

pub struct MerchantRepository;

impl MerchantRepository {
    /// Insert a merchant. A missing owner surfaces as a foreign key violation.
    pub async fn insert(pool: &DbPool, merchant: &Merchant) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO merchants \
             (id, admin_id, name, name_search, merchant_category, image_url, latitude, longitude, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(merchant.id)
        .bind(merchant.admin_id)
        .bind(&merchant.name)
        .bind(merchant.name.to_lowercase())
        .bind(merchant.category.as_str())
        .bind(&merchant.image_url)
        .bind(merchant.latitude)
        .bind(merchant.longitude)
        .bind(merchant.created_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// One page of merchants matching `filter`, plus the total match count.
    ///
    /// Both statements run in one read transaction on one connection, so
    /// the page and the total come from the same snapshot.
    pub async fn find_page(
        pool: &DbPool,
        filter: &MerchantFilter,
    ) -> Result<(Vec<Merchant>, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut page = page_query(TABLE, COLUMNS, filter);
        let merchants = page
            .build_query_as::<Merchant>()
            .fetch_all(&mut *tx)
            .await?;

        let mut count = count_query(TABLE, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((merchants, total))
    }
}
