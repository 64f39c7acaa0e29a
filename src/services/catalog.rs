use std::collections::HashMap;

use thiserror::Error;

use crate::dto::sales::SaleItemRequest;
use crate::models::{Product, SaleItem, User};

/// Why a sale request was refused. Every variant belongs to the
/// bad-request class; none of them leaves any trace in the collections.
#[derive(Debug, Error, PartialEq)]
pub enum SaleRejection {
    #[error("user {0} does not exist")]
    UserNotFound(i64),

    #[error("user {0} is inactive")]
    UserInactive(i64),

    #[error("each item requires a product id and a quantity > 0")]
    EmptyOrder,

    #[error("product {0} does not exist or is inactive")]
    ProductUnavailable(i64),

    #[error("insufficient stock for product {0}")]
    InsufficientStock(i64),
}

/// One requested line resolved against the catalog snapshot.
#[derive(Debug)]
pub struct ValidatedLine<'a> {
    pub product: &'a Product,
    pub quantity: i64,
}

/// Check a requested sale against current snapshots. All-or-nothing: the
/// first failing line rejects the whole request, and nothing is mutated.
pub fn validate_sale<'a>(
    user_id: i64,
    requested: &[SaleItemRequest],
    users: &[User],
    catalog: &'a [Product],
) -> Result<Vec<ValidatedLine<'a>>, SaleRejection> {
    let user = users
        .iter()
        .find(|u| u.id == user_id)
        .ok_or(SaleRejection::UserNotFound(user_id))?;
    if !user.active {
        return Err(SaleRejection::UserInactive(user_id));
    }

    if requested.is_empty() {
        return Err(SaleRejection::EmptyOrder);
    }

    // Stock is checked against what earlier lines of this request already
    // claimed, so a product repeated across lines cannot oversell.
    let mut remaining: HashMap<i64, i64> = HashMap::new();
    let mut lines = Vec::with_capacity(requested.len());
    for item in requested {
        if item.product_id <= 0 || item.quantity <= 0 {
            return Err(SaleRejection::EmptyOrder);
        }
        let product = catalog
            .iter()
            .find(|p| p.id == item.product_id && p.active)
            .ok_or(SaleRejection::ProductUnavailable(item.product_id))?;
        let left = remaining.entry(product.id).or_insert(product.stock);
        if *left < item.quantity {
            return Err(SaleRejection::InsufficientStock(item.product_id));
        }
        *left -= item.quantity;
        lines.push(ValidatedLine {
            product,
            quantity: item.quantity,
        });
    }

    Ok(lines)
}

/// Price validated lines from catalog unit prices. Pure; the client never
/// supplies a price that reaches this point.
pub fn price_lines(lines: &[ValidatedLine<'_>]) -> (Vec<SaleItem>, f64) {
    let items: Vec<SaleItem> = lines
        .iter()
        .map(|line| {
            let unit_price = line.product.price;
            SaleItem {
                product_id: line.product.id,
                quantity: line.quantity,
                unit_price,
                subtotal: unit_price * line.quantity as f64,
            }
        })
        .collect();

    let total = items.iter().map(|item| item.subtotal).sum();
    (items, total)
}

/// Subtract sold quantities from an in-memory catalog copy. Call only after
/// `validate_sale` accepted every line, so stock cannot go negative and a
/// multi-line sale is never half applied.
pub fn apply_decrement(catalog: &mut [Product], items: &[SaleItem]) {
    for item in items {
        if let Some(product) = catalog.iter_mut().find(|p| p.id == item.product_id) {
            product.stock -= item.quantity;
        }
    }
}
