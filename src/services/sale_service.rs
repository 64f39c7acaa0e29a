use chrono::Utc;

use crate::{
    dto::sales::{CreateSaleRequest, SaleList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, Sale, User},
    response::{ApiResponse, Meta},
    services::catalog,
    state::AppState,
    store::{Collection, next_id},
};

/// Place an order: validate against fresh snapshots, price from the
/// catalog, decrement stock in memory, then persist the sales collection
/// followed by the catalog. Nothing is written until every line validated,
/// so a rejection leaves both documents untouched. There is no
/// cross-request lock; two simultaneous placements can race on stock.
pub async fn create_sale(
    state: &AppState,
    actor: Option<&AuthUser>,
    payload: CreateSaleRequest,
) -> AppResult<ApiResponse<Sale>> {
    // A session identity outranks whatever the body claims.
    let user_id = actor.map(|a| a.user_id).unwrap_or(payload.user_id);
    if user_id <= 0 {
        return Err(AppError::BadRequest(
            "user_id must be a positive integer".into(),
        ));
    }
    if payload.address.trim().is_empty() {
        return Err(AppError::BadRequest("address is required".into()));
    }

    let users: Vec<User> = state.store.load(Collection::Users).await?;
    let mut products: Vec<Product> = state.store.load(Collection::Products).await?;
    let mut sales: Vec<Sale> = state.store.load(Collection::Sales).await?;

    let (items, total) = {
        let lines = catalog::validate_sale(user_id, &payload.items, &users, &products)?;
        catalog::price_lines(&lines)
    };

    let sale = Sale {
        id: next_id(&sales),
        user_id,
        created_at: Utc::now(),
        total,
        address: payload.address,
        paid: false,
        invoiced: false,
        shipped: false,
        items,
    };

    catalog::apply_decrement(&mut products, &sale.items);
    sales.push(sale.clone());

    // Two documents, no transaction: if the second write fails the caller
    // cannot assume which of them landed.
    state.store.commit(Collection::Sales, &sales).await?;
    state.store.commit(Collection::Products, &products).await?;

    tracing::info!(
        sale_id = sale.id,
        user_id = sale.user_id,
        total = sale.total,
        "sale created"
    );

    Ok(ApiResponse::success("Sale created", sale, Some(Meta::empty())))
}

pub async fn list_sales(state: &AppState) -> AppResult<ApiResponse<SaleList>> {
    let sales: Vec<Sale> = state.store.load(Collection::Sales).await?;
    let meta = Meta::total(sales.len() as i64);
    Ok(ApiResponse::success(
        "Sales",
        SaleList { items: sales },
        Some(meta),
    ))
}

pub async fn get_sale(state: &AppState, id: i64) -> AppResult<ApiResponse<Sale>> {
    let sales: Vec<Sale> = state.store.load(Collection::Sales).await?;
    let sale = sales
        .into_iter()
        .find(|s| s.id == id)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Sale", sale, None))
}
