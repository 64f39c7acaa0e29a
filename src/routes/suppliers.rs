use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::Supplier,
    response::{ApiResponse, Meta},
    state::AppState,
    store::Collection,
};

#[derive(Serialize, ToSchema)]
pub struct SupplierList {
    pub items: Vec<Supplier>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_suppliers))
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    responses(
        (status = 200, description = "List suppliers", body = ApiResponse<SupplierList>)
    ),
    tag = "Suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SupplierList>>> {
    let suppliers: Vec<Supplier> = state.store.load(Collection::Suppliers).await?;
    let meta = Meta::total(suppliers.len() as i64);
    Ok(Json(ApiResponse::success(
        "Suppliers",
        SupplierList { items: suppliers },
        Some(meta),
    )))
}
