//! # Merchant Service

use std::sync::Arc;

use lib_core::model::store::MerchantRepository;
use lib_core::model::{ListFilter, Merchant, MerchantFilter, MerchantForCreate, Page};
use lib_core::{AppError, Clock, DbPool, IdGenerator, Result};
use tracing::{debug, info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct MerchantService {
    db: DbPool,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl MerchantService {
    pub fn new(db: DbPool, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { db, clock, ids }
    }

    /// Register a merchant owned by `admin_id`; returns the new merchant id.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, admin_id: Uuid, input: MerchantForCreate) -> Result<Uuid> {
        let merchant = Merchant {
            id: self.ids.new_id(),
            admin_id,
            name: input.name,
            category: input.category,
            image_url: input.image_url,
            latitude: input.latitude,
            longitude: input.longitude,
            created_at: self.clock.now(),
        };

        MerchantRepository::insert(&self.db, &merchant)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::NotFound(_) => AppError::NotFound("admin not found".to_string()),
                other => other,
            })?;

        info!("[MERCHANT] Created merchant {}", merchant.id);
        Ok(merchant.id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: MerchantFilter) -> Result<Page<Merchant>> {
        let (items, total) = MerchantRepository::find_page(&self.db, &filter).await?;
        debug!("[MERCHANT] Listed {} of {}", items.len(), total);

        Ok(Page {
            items,
            total,
            pagination: filter.pagination(),
        })
    }
}
