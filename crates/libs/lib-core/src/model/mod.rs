//! # Domain Model
//!
//! Entities, list filters, the query builder, and the SQLite store.

pub mod account;
pub mod merchant;
pub mod product;
pub mod query;
pub mod store;

use thiserror::Error;

pub use account::{Account, AccountForCreate, LoginCredentials, NewAccount, Role};
pub use merchant::{Merchant, MerchantCategory, MerchantFilter, MerchantForCreate};
pub use product::{Product, ProductCategory, ProductFilter, ProductForCreate};
pub use query::{ListFilter, Page, Pagination, SortDirection};

/// A category string that is not one of the fixed variants.
#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseCategoryError {
    pub kind: &'static str,
    pub value: String,
}
