//! # Merchants

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::query::{ListFilter, OrderBy, Pagination, Predicate, SortDirection};
use super::ParseCategoryError;

/// Kind of merchant. Stored and sent as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MerchantCategory {
    SmallRestaurant,
    MediumRestaurant,
    LargeRestaurant,
    MerchandiseRestaurant,
    BoothKiosk,
    ConvenienceStore,
}

impl MerchantCategory {
    pub const ALL: [MerchantCategory; 6] = [
        MerchantCategory::SmallRestaurant,
        MerchantCategory::MediumRestaurant,
        MerchantCategory::LargeRestaurant,
        MerchantCategory::MerchandiseRestaurant,
        MerchantCategory::BoothKiosk,
        MerchantCategory::ConvenienceStore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantCategory::SmallRestaurant => "SmallRestaurant",
            MerchantCategory::MediumRestaurant => "MediumRestaurant",
            MerchantCategory::LargeRestaurant => "LargeRestaurant",
            MerchantCategory::MerchandiseRestaurant => "MerchandiseRestaurant",
            MerchantCategory::BoothKiosk => "BoothKiosk",
            MerchantCategory::ConvenienceStore => "ConvenienceStore",
        }
    }
}

impl fmt::Display for MerchantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MerchantCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError {
                kind: "merchant category",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for MerchantCategory {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Merchant row.
#[derive(Debug, Clone, FromRow)]
pub struct Merchant {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub name: String,
    #[sqlx(rename = "merchant_category", try_from = "String")]
    pub category: MerchantCategory,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// Validated merchant registration input.
#[derive(Debug, Clone)]
pub struct MerchantForCreate {
    pub name: String,
    pub category: MerchantCategory,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Criteria for listing merchants.
#[derive(Debug, Clone, Default)]
pub struct MerchantFilter {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub category: Option<MerchantCategory>,
    pub pagination: Pagination,
    pub direction: SortDirection,
}

impl ListFilter for MerchantFilter {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(id) = self.id {
            predicates.push(Predicate::eq("id", id));
        }
        if let Some(name) = &self.name {
            predicates.push(Predicate::contains("name_search", name));
        }
        if let Some(category) = self.category {
            predicates.push(Predicate::eq("merchant_category", category.as_str()));
        }

        predicates
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }

    fn order_by(&self) -> OrderBy {
        OrderBy::created_at(self.direction)
    }
}
