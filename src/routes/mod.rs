use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod health;
pub mod products;
pub mod sales;
pub mod suppliers;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/suppliers", suppliers::router())
        .nest("/users", users::router())
        .nest("/sales", sales::router())
        .nest("/auth", auth::router())
}
