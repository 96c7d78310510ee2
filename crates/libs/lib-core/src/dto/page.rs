//! # List Envelope

use serde::{Deserialize, Serialize};

use crate::model::Page;

/// `{ "data": [...], "meta": { "limit", "offset", "total" } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Effective paging of a listing and the size of the whole filtered set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

impl<T> ListResponse<T> {
    /// Map each row of `page` to its response shape.
    pub fn from_page<U>(page: Page<U>, map: impl FnMut(U) -> T) -> Self {
        Self {
            data: page.items.into_iter().map(map).collect(),
            meta: PageMeta {
                limit: page.pagination.limit,
                offset: page.pagination.offset,
                total: page.total,
            },
        }
    }
}
