//! # Merchant Handlers
//!
//! Admin-only; the caller's identity comes from [`CurrentAccount`].

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Json, Query, State,
    },
    http::StatusCode,
};
use lib_core::dto::{
    ListResponse, MerchantCreatedResponse, MerchantListQuery, MerchantRequest, MerchantResponse,
};
use lib_core::model::{MerchantFilter, MerchantForCreate};
use lib_core::AppError;
use tracing::instrument;

use super::{json_body, query_params};
use crate::middleware::CurrentAccount;
use crate::services::MerchantService;


/// `POST /admin/merchants`
#[instrument(skip_all, fields(admin_id = %current.id))]
pub async fn create_merchant(
    State(merchants): State<MerchantService>,
    Extension(current): Extension<CurrentAccount>,
    payload: Result<Json<MerchantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MerchantCreatedResponse>), AppError> {
    let input = MerchantForCreate::try_from(json_body(payload)?)?;

    let id = merchants.create(current.id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MerchantCreatedResponse {
            merchant_id: id.to_string(),
        }),
    ))
}

/// `GET /admin/merchants`
#[instrument(skip_all)]
pub async fn list_merchants(
    State(merchants): State<MerchantService>,
    query: Result<Query<MerchantListQuery>, QueryRejection>,
) -> Result<Json<ListResponse<MerchantResponse>>, AppError> {
    let filter = MerchantFilter::from(query_params(query)?);

    let page = merchants.list(filter).await?;

    Ok(Json(ListResponse::from_page(page, MerchantResponse::from)))
}
