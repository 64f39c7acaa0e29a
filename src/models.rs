use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Identified;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub active: bool,
    pub is_admin: bool,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub stock: i64,
    pub active: bool,
    pub category: String,
    pub unit: String,
    pub supplier_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub total: f64,
    pub address: String,
    pub paid: bool,
    pub invoiced: bool,
    pub shipped: bool,
    pub items: Vec<SaleItem>,
}

/// A catalog snapshot of one ordered product line. `unit_price` and
/// `subtotal` are frozen at sale creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Supplier {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Product {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Sale {
    fn id(&self) -> i64 {
        self.id
    }
}
