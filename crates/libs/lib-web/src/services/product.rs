//! # Product Service

use std::sync::Arc;

use lib_core::model::store::ProductRepository;
use lib_core::model::{ListFilter, Page, Product, ProductFilter, ProductForCreate};
use lib_core::{AppError, Clock, DbPool, IdGenerator, Result};
use tracing::{debug, info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductService {
    db: DbPool,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ProductService {
    pub fn new(db: DbPool, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { db, clock, ids }
    }

    /// Add a product to `merchant_id`; returns the new item id.
    ///
    /// A merchant that does not exist is `NotFound`.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(
        &self,
        admin_id: Uuid,
        merchant_id: Uuid,
        input: ProductForCreate,
    ) -> Result<Uuid> {
        let product = Product {
            id: self.ids.new_id(),
            admin_id,
            merchant_id,
            name: input.name,
            category: input.category,
            price: input.price,
            image_url: input.image_url,
            created_at: self.clock.now(),
        };

        ProductRepository::insert(&self.db, &product)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::NotFound(_) => AppError::NotFound("merchant not found".to_string()),
                other => other,
            })?;

        info!("[ITEM] Created item {} for merchant {}", product.id, merchant_id);
        Ok(product.id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: ProductFilter) -> Result<Page<Product>> {
        let (items, total) = ProductRepository::find_page(&self.db, &filter).await?;
        debug!("[ITEM] Listed {} of {}", items.len(), total);

        Ok(Page {
            items,
            total,
            pagination: filter.pagination(),
        })
    }
}
