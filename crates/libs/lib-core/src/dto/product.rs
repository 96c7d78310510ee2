//! # Product Data Transfer Objects
//!
//! Products are "items" on the wire.
//!
//! - `POST /admin/merchants/{merchantId}/items` - [`ProductRequest`] -> [`ProductCreatedResponse`]
//! - `GET /admin/merchants/{merchantId}/items` - [`ProductListQuery`] (query) -> `ListResponse<ProductResponse>`

use lib_utils::{format_time, validate_length, validate_url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{lenient, non_empty};
use crate::model::product::MIN_PRICE;
use crate::model::{
    Pagination, Product, ProductCategory, ProductFilter, ProductForCreate, SortDirection,
};
use crate::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub product_category: String,
    pub price: f64,
    pub image_url: String,
}

impl TryFrom<ProductRequest> for ProductForCreate {
    type Error = AppError;

    fn try_from(req: ProductRequest) -> Result<Self, Self::Error> {
        validate_length(&req.name, 2, 30, "name").map_err(AppError::BadInput)?;

        let category = req
            .product_category
            .parse::<ProductCategory>()
            .map_err(|e| AppError::BadInput(e.to_string()))?;

        if !req.price.is_finite() || req.price < MIN_PRICE {
            return Err(AppError::BadInput("price must be at least 1".to_string()));
        }

        validate_url(&req.image_url, "imageUrl").map_err(AppError::BadInput)?;

        Ok(ProductForCreate {
            name: req.name,
            category,
            price: req.price,
            image_url: req.image_url,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatedResponse {
    pub item_id: String,
}

/// Query string of the product listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub product_category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub created_at: Option<String>,
}

impl ProductListQuery {
    /// Filter over the products of `merchant_id`.
    pub fn into_filter(self, merchant_id: Uuid) -> ProductFilter {
        ProductFilter {
            merchant_id,
            id: lenient(self.item_id.as_deref()),
            name: non_empty(self.name),
            category: lenient(self.product_category.as_deref()),
            pagination: Pagination::new(
                lenient(self.limit.as_deref()),
                lenient(self.offset.as_deref()),
            ),
            direction: SortDirection::parse_or_default(self.created_at.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub item_id: String,
    pub name: String,
    pub product_category: ProductCategory,
    pub price: f64,
    pub image_url: String,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            item_id: p.id.to_string(),
            name: p.name,
            product_category: p.category,
            price: p.price,
            image_url: p.image_url,
            created_at: format_time(p.created_at),
        }
    }
}
