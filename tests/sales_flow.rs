use axum_storefront_api::{
    dto::sales::{CreateSaleRequest, SaleItemRequest},
    dto::users::RegisterRequest,
    error::AppError,
    models::{Product, Sale, User},
    services::{sale_service, user_service},
    state::AppState,
    store::{Collection, JsonStore},
};
use chrono::Utc;
use tempfile::TempDir;

// Integration flow over a throwaway data directory: seed users and catalog,
// place sales through the service layer, and check what landed on disk.

fn setup_state(dir: &TempDir) -> AppState {
    AppState {
        store: JsonStore::new(dir.path()),
    }
}

fn user(id: i64, active: bool) -> User {
    User {
        id,
        first_name: "Ana".into(),
        last_name: "Viola".into(),
        email: format!("user{id}@example.com"),
        password_hash: "seeded".into(),
        active,
        is_admin: false,
        registered_at: Utc::now(),
    }
}

fn product(id: i64, price: f64, stock: i64, active: bool) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        description: None,
        price,
        image: None,
        stock,
        active,
        category: "pantry".into(),
        unit: "kg".into(),
        supplier_id: 1,
    }
}

fn sale_request(user_id: i64, items: Vec<(i64, i64)>) -> CreateSaleRequest {
    CreateSaleRequest {
        user_id,
        address: "X".into(),
        items: items
            .into_iter()
            .map(|(product_id, quantity)| SaleItemRequest {
                product_id,
                quantity,
            })
            .collect(),
    }
}

async fn seed(state: &AppState, users: &[User], products: &[Product]) -> anyhow::Result<()> {
    state.store.commit(Collection::Users, users).await?;
    state.store.commit(Collection::Products, products).await?;
    Ok(())
}

#[tokio::test]
async fn placing_a_sale_snapshots_prices_and_decrements_stock() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 3, true)]).await?;

    let resp = sale_service::create_sale(&state, None, sale_request(1, vec![(7, 2)])).await?;
    let sale = resp.data.expect("sale data");

    assert_eq!(sale.id, 1);
    assert_eq!(sale.user_id, 1);
    assert_eq!(sale.total, 200.0);
    assert!(!sale.paid && !sale.invoiced && !sale.shipped);
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].product_id, 7);
    assert_eq!(sale.items[0].quantity, 2);
    assert_eq!(sale.items[0].unit_price, 100.0);
    assert_eq!(sale.items[0].subtotal, 200.0);

    // Both documents were rewritten.
    let products: Vec<Product> = state.store.load(Collection::Products).await?;
    assert_eq!(products[0].stock, 1);
    let sales: Vec<Sale> = state.store.load(Collection::Sales).await?;
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id, sale.id);
    Ok(())
}

#[tokio::test]
async fn sale_ids_keep_increasing_past_the_existing_max() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 10, true)]).await?;

    let first = sale_service::create_sale(&state, None, sale_request(1, vec![(7, 1)]))
        .await?
        .data
        .unwrap();
    let second = sale_service::create_sale(&state, None, sale_request(1, vec![(7, 1)]))
        .await?
        .data
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    Ok(())
}

#[tokio::test]
async fn insufficient_stock_rejects_without_touching_either_document() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 3, true)]).await?;
    let products_before = tokio::fs::read(state.store.path(Collection::Products)).await?;

    let result = sale_service::create_sale(&state, None, sale_request(1, vec![(7, 5)])).await;
    let err = result.err().expect("expected rejection");
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("insufficient stock")));

    let products_after = tokio::fs::read(state.store.path(Collection::Products)).await?;
    assert_eq!(products_before, products_after, "catalog bytes must not change");
    let sales: Vec<Sale> = state.store.load(Collection::Sales).await?;
    assert!(sales.is_empty(), "no sale may be recorded on rejection");
    Ok(())
}

#[tokio::test]
async fn duplicate_product_lines_cannot_oversell_the_stock() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 3, true)]).await?;
    let products_before = tokio::fs::read(state.store.path(Collection::Products)).await?;

    // Each line alone fits within the 3 in stock; together they do not.
    let result =
        sale_service::create_sale(&state, None, sale_request(1, vec![(7, 2), (7, 2)])).await;
    let err = result.err().expect("expected rejection");
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("insufficient stock")));

    let products_after = tokio::fs::read(state.store.path(Collection::Products)).await?;
    assert_eq!(products_before, products_after, "catalog bytes must not change");
    let sales: Vec<Sale> = state.store.load(Collection::Sales).await?;
    assert!(sales.is_empty(), "no sale may be recorded on rejection");
    Ok(())
}

#[tokio::test]
async fn unknown_user_is_rejected_before_the_catalog_is_consulted() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 3, true)]).await?;

    let result = sale_service::create_sale(&state, None, sale_request(99, vec![(7, 1)])).await;
    let err = result.err().expect("expected rejection");
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("user 99")));
    Ok(())
}

#[tokio::test]
async fn inactive_product_rejects_the_whole_multi_line_sale() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(
        &state,
        &[user(1, true)],
        &[product(7, 100.0, 3, true), product(8, 50.0, 10, false)],
    )
    .await?;

    let result =
        sale_service::create_sale(&state, None, sale_request(1, vec![(7, 1), (8, 1)])).await;
    assert!(result.is_err());

    // The already-validated first line must not have been applied.
    let products: Vec<Product> = state.store.load(Collection::Products).await?;
    assert_eq!(products[0].stock, 3);
    Ok(())
}

#[tokio::test]
async fn client_supplied_totals_are_ignored() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 3, true)]).await?;

    // The request DTO has no price field at all; whatever extra JSON a
    // client sends is dropped at deserialization. Totals come from the
    // catalog alone.
    let payload: CreateSaleRequest = serde_json::from_value(serde_json::json!({
        "user_id": 1,
        "address": "X",
        "items": [{ "product_id": 7, "quantity": 2, "unit_price": 1.0, "subtotal": 2.0 }]
    }))?;
    let sale = sale_service::create_sale(&state, None, payload)
        .await?
        .data
        .unwrap();
    assert_eq!(sale.total, 200.0);
    assert_eq!(sale.items[0].unit_price, 100.0);
    Ok(())
}

#[tokio::test]
async fn blank_address_and_empty_item_list_are_bad_requests() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 3, true)]).await?;

    let result = sale_service::create_sale(
        &state,
        None,
        CreateSaleRequest {
            user_id: 1,
            address: "   ".into(),
            items: vec![SaleItemRequest {
                product_id: 7,
                quantity: 1,
            }],
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = sale_service::create_sale(&state, None, sale_request(1, vec![])).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn session_identity_outranks_the_body_supplied_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(
        &state,
        &[user(1, true), user(2, true)],
        &[product(7, 100.0, 3, true)],
    )
    .await?;

    let actor = axum_storefront_api::middleware::auth::AuthUser {
        user_id: 2,
        role: "user".into(),
    };
    let sale = sale_service::create_sale(&state, Some(&actor), sale_request(1, vec![(7, 1)]))
        .await?
        .data
        .unwrap();
    assert_eq!(sale.user_id, 2);
    Ok(())
}

#[tokio::test]
async fn users_referenced_by_sales_cannot_be_deleted() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);
    seed(&state, &[user(1, true)], &[product(7, 100.0, 3, true)]).await?;
    sale_service::create_sale(&state, None, sale_request(1, vec![(7, 1)])).await?;

    let result = user_service::delete_user(&state, 1).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let users: Vec<User> = state.store.load(Collection::Users).await?;
    assert_eq!(users.len(), 1);
    Ok(())
}

#[tokio::test]
async fn registration_allocates_ids_and_rejects_duplicate_emails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_state(&dir);

    let first = user_service::register_user(
        &state,
        RegisterRequest {
            first_name: "Ana".into(),
            last_name: "Viola".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
            active: true,
            is_admin: false,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(first.id, 1);
    assert_ne!(first.password_hash, "secret", "password must be hashed");

    let duplicate = user_service::register_user(
        &state,
        RegisterRequest {
            first_name: "Ana".into(),
            last_name: "Dup".into(),
            email: "ANA@example.com".into(),
            password: "other".into(),
            active: true,
            is_admin: false,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    Ok(())
}
