//! # Item Handlers
//!
//! Products of one merchant, addressed as `/admin/merchants/{merchantId}/items`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Json, Path, Query, State,
    },
    http::StatusCode,
};
use lib_core::dto::{
    parse_path_id, ListResponse, ProductCreatedResponse, ProductListQuery, ProductRequest,
    ProductResponse,
};
use lib_core::model::ProductForCreate;
use lib_core::AppError;
use tracing::instrument;

use super::{json_body, query_params};
use crate::middleware::CurrentAccount;
use crate::services::ProductService;

#[cfg(test)]
mod tests;

/// `POST /admin/merchants/{merchantId}/items`
#[instrument(skip_all, fields(admin_id = %current.id, merchant_id = %merchant_id))]
pub async fn create_product(
    State(products): State<ProductService>,
    Extension(current): Extension<CurrentAccount>,
    Path(merchant_id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>), AppError> {
    let merchant_id = parse_path_id(&merchant_id, "merchantId")?;
    let input = ProductForCreate::try_from(json_body(payload)?)?;

    let id = products.create(current.id, merchant_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            item_id: id.to_string(),
        }),
    ))
}

/// `GET /admin/merchants/{merchantId}/items`
#[instrument(skip_all, fields(merchant_id = %merchant_id))]
pub async fn list_products(
    State(products): State<ProductService>,
    Path(merchant_id): Path<String>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<ListResponse<ProductResponse>>, AppError> {
    let merchant_id = parse_path_id(&merchant_id, "merchantId")?;
    let filter = query_params(query)?.into_filter(merchant_id);

    let page = products.list(filter).await?;

    Ok(Json(ListResponse::from_page(page, ProductResponse::from)))
}
