use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

// Distinguishes an absent field (leave as-is) from an explicit null
// (clear the value): missing -> None, null -> Some(None).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub stock: i64,
    #[serde(default)]
    pub active: bool,
    pub category: String,
    pub unit: String,
    pub supplier_id: i64,
}

/// Closed update schema: only these fields are editable. Unknown fields in
/// the request body deserialize to nothing instead of reaching the record.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: Option<Option<String>>,
    pub stock: Option<i64>,
    pub active: Option<bool>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub supplier_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub active: Option<bool>,
    pub supplier: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
