//! # Products
//!
//! Products are called "items" on the wire.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::query::{ListFilter, OrderBy, Pagination, Predicate, SortDirection};
use super::ParseCategoryError;

/// Minimum accepted price.
pub const MIN_PRICE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Beverage,
    Food,
    Snack,
    Condiments,
    Additions,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Beverage,
        ProductCategory::Food,
        ProductCategory::Snack,
        ProductCategory::Condiments,
        ProductCategory::Additions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Beverage => "Beverage",
            ProductCategory::Food => "Food",
            ProductCategory::Snack => "Snack",
            ProductCategory::Condiments => "Condiments",
            ProductCategory::Additions => "Additions",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError {
                kind: "product category",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for ProductCategory {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Product row.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub merchant_id: Uuid,
    pub name: String,
    #[sqlx(rename = "product_category", try_from = "String")]
    pub category: ProductCategory,
    pub price: f64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Validated product registration input.
#[derive(Debug, Clone)]
pub struct ProductForCreate {
    pub name: String,
    pub category: ProductCategory,
    pub price: f64,
    pub image_url: String,
}

/// Criteria for listing the products of one merchant.
#[derive(Debug, Clone)]
pub struct ProductFilter {
    pub merchant_id: Uuid,
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    pub pagination: Pagination,
    pub direction: SortDirection,
}

impl ProductFilter {
    /// All products of `merchant_id`, default page and order.
    pub fn for_merchant(merchant_id: Uuid) -> Self {
        Self {
            merchant_id,
            id: None,
            name: None,
            category: None,
            pagination: Pagination::default(),
            direction: SortDirection::default(),
        }
    }
}

impl ListFilter for ProductFilter {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::eq("merchant_id", self.merchant_id)];

        if let Some(id) = self.id {
            predicates.push(Predicate::eq("id", id));
        }
        if let Some(name) = &self.name {
            predicates.push(Predicate::contains("name_search", name));
        }
        if let Some(category) = self.category {
            predicates.push(Predicate::eq("product_category", category.as_str()));
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
