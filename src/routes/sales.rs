use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::sales::{CreateSaleRequest, SaleList},
    error::AppResult,
    middleware::auth::MaybeAuthUser,
    models::Sale,
    response::ApiResponse,
    services::sale_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales))
        .route("/", post(create_sale))
        .route("/{id}", get(get_sale))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    responses(
        (status = 200, description = "List sales", body = ApiResponse<SaleList>)
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    let resp = sale_service::list_sales(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    params(
        ("id" = i64, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Get sale", body = ApiResponse<Sale>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Sale>>> {
    let resp = sale_service::get_sale(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale created", body = ApiResponse<Sale>),
        (status = 400, description = "Invalid request, unknown entity or insufficient stock"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    MaybeAuthUser(actor): MaybeAuthUser,
    Json(payload): Json<CreateSaleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Sale>>)> {
    let resp = sale_service::create_sale(&state, actor.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
