use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;

use axum_storefront_api::{
    config::AppConfig,
    models::{Product, Sale, Supplier, User},
    store::{Collection, JsonStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    tokio::fs::create_dir_all(&config.data_dir).await?;
    let store = JsonStore::new(&config.data_dir);

    let users = vec![
        seed_user(1, "admin", "admin@example.com", "admin123", true)?,
        seed_user(2, "user", "user@example.com", "user123", false)?,
    ];
    store.commit(Collection::Users, &users).await?;

    let suppliers = vec![
        Supplier {
            id: 1,
            name: "Huerta del Sur".into(),
            contact: Some("Marta Gil".into()),
            email: Some("ventas@huertadelsur.example".into()),
            phone: Some("+54 11 4000 0001".into()),
            active: true,
        },
        Supplier {
            id: 2,
            name: "Granja Los Alamos".into(),
            contact: None,
            email: Some("pedidos@losalamos.example".into()),
            phone: None,
            active: true,
        },
    ];
    store.commit(Collection::Suppliers, &suppliers).await?;

    let products = vec![
        product(1, "Tomate perita", 350.0, 40, "verduras", "kg", 1),
        product(2, "Manzana roja", 420.0, 25, "frutas", "kg", 1),
        product(3, "Huevos de campo", 1800.0, 12, "granja", "docena", 2),
        product(4, "Miel pura", 2500.0, 8, "granja", "frasco", 2),
    ];
    store.commit(Collection::Products, &products).await?;

    let sales: Vec<Sale> = Vec::new();
    store.commit(Collection::Sales, &sales).await?;

    println!(
        "Seed completed in {}: {} users, {} suppliers, {} products",
        config.data_dir.display(),
        users.len(),
        suppliers.len(),
        products.len()
    );
    Ok(())
}

fn seed_user(
    id: i64,
    name: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) -> anyhow::Result<User> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    Ok(User {
        id,
        first_name: name.to_string(),
        last_name: "Seed".into(),
        email: email.to_string(),
        password_hash,
        active: true,
        is_admin,
        registered_at: Utc::now(),
    })
}

fn product(
    id: i64,
    name: &str,
    price: f64,
    stock: i64,
    category: &str,
    unit: &str,
    supplier_id: i64,
) -> Product {
    Product {
        id,
        name: name.into(),
        description: None,
        price,
        image: None,
        stock,
        active: true,
        category: category.into(),
        unit: unit.into(),
        supplier_id,
    }
}
