//! # Merchant Data Transfer Objects
//!
//! - `POST /admin/merchants` - [`MerchantRequest`] -> [`MerchantCreatedResponse`]
//! - `GET /admin/merchants` - [`MerchantListQuery`] (query) -> `ListResponse<MerchantResponse>`

use lib_utils::{format_time, validate_length, validate_url};
use serde::{Deserialize, Serialize};

use super::{lenient, non_empty};
use crate::model::{
    Merchant, MerchantCategory, MerchantFilter, MerchantForCreate, Pagination, SortDirection,
};
use crate::AppError;

/// Geographic position of a merchant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

/// Merchant registration body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantRequest {
    pub name: String,
    pub merchant_category: String,
    pub image_url: String,
    pub location: Location,
}

impl TryFrom<MerchantRequest> for MerchantForCreate {
    type Error = AppError;

    fn try_from(req: MerchantRequest) -> Result<Self, Self::Error> {
        validate_length(&req.name, 2, 30, "name").map_err(AppError::BadInput)?;

        let category = req
            .merchant_category
            .parse::<MerchantCategory>()
            .map_err(|e| AppError::BadInput(e.to_string()))?;

        validate_url(&req.image_url, "imageUrl").map_err(AppError::BadInput)?;

        let Location { lat, long } = req.location;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::BadInput(
                "location.lat must be between -90 and 90".to_string(),
            ));
        }
        if !long.is_finite() || !(-180.0..=180.0).contains(&long) {
            return Err(AppError::BadInput(
                "location.long must be between -180 and 180".to_string(),
            ));
        }

        Ok(MerchantForCreate {
            name: req.name,
            category,
            image_url: req.image_url,
            latitude: lat,
            longitude: long,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantCreatedResponse {
    pub merchant_id: String,
}

/// Query string of the merchant listing. Every field is optional and parsed leniently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantListQuery {
    pub merchant_id: Option<String>,
    pub name: Option<String>,
    pub merchant_category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub created_at: Option<String>,
}

impl From<MerchantListQuery> for MerchantFilter {
    fn from(q: MerchantListQuery) -> Self {
        MerchantFilter {
            id: lenient(q.merchant_id.as_deref()),
            name: non_empty(q.name),
            category: lenient(q.merchant_category.as_deref()),
            pagination: Pagination::new(lenient(q.limit.as_deref()), lenient(q.offset.as_deref())),
            direction: SortDirection::parse_or_default(q.created_at.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantResponse {
    pub merchant_id: String,
    pub name: String,
    pub merchant_category: MerchantCategory,
    pub image_url: String,
    pub location: Location,
    pub created_at: String,
}

impl From<Merchant> for MerchantResponse {
    fn from(m: Merchant) -> Self {
        Self {
            merchant_id: m.id.to_string(),
            name: m.name,
            merchant_category: m.category,
            image_url: m.image_url,
            location: Location {
                lat: m.latitude,
                long: m.longitude,
            },
            created_at: format_time(m.created_at),
        }
    }
}
