use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Sale;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaleItemRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// Order placement payload. Prices are never accepted from the client;
/// they are read from the catalog during validation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub user_id: i64,
    pub address: String,
    #[serde(default)]
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleList {
    pub items: Vec<Sale>,
}
