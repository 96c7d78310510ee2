//! # Data Transfer Objects (DTOs)
//!
//! Request and response shapes of the REST API, plus the conversions that
//! validate requests into domain values.
//!
//! ## Wire Format
//!
//! All DTOs use **camelCase** field names in JSON.

pub mod account;
pub mod merchant;
pub mod page;
pub mod product;

pub use account::*;
pub use merchant::*;
pub use page::*;
pub use product::*;

use crate::AppError;
use uuid::Uuid;

/// Parse an optional query value leniently: empty or malformed means absent.
pub(crate) fn lenient<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Empty search text means no filter.
pub(crate) fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Parse a path identifier; malformed ids are the caller's fault.
pub fn parse_path_id(raw: &str, field_name: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadInput(format!("{} must be a valid id", field_name)))
}
