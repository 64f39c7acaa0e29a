use crate::{
    dto::products::{CreateProductRequest, ProductList, ProductQuery, UpdateProductRequest},
    error::{AppError, AppResult},
    models::{Product, Sale},
    response::{ApiResponse, Meta},
    state::AppState,
    store::{Collection, next_id},
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let mut products: Vec<Product> = state.store.load(Collection::Products).await?;

    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
    }
    if let Some(active) = query.active {
        products.retain(|p| p.active == active);
    }
    if let Some(supplier) = query.supplier {
        products.retain(|p| p.supplier_id == supplier);
    }

    let meta = Meta::total(products.len() as i64);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items: products },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Product>> {
    let products: Vec<Product> = state.store.load(Collection::Products).await?;
    let product = products
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    check_price_and_stock(payload.price, payload.stock)?;

    let mut products: Vec<Product> = state.store.load(Collection::Products).await?;
    let product = Product {
        id: next_id(&products),
        name: payload.name,
        description: payload.description,
        price: payload.price,
        image: payload.image,
        stock: payload.stock,
        active: payload.active,
        category: payload.category,
        unit: payload.unit,
        supplier_id: payload.supplier_id,
    };

    products.push(product.clone());
    state.store.commit(Collection::Products, &products).await?;

    tracing::info!(product_id = product.id, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

/// Applies only the fields of the closed update schema; anything else the
/// caller sent never reaches the record.
pub async fn update_product(
    state: &AppState,
    id: i64,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let mut products: Vec<Product> = state.store.load(Collection::Products).await?;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(AppError::NotFound)?;

    if let Some(name) = payload.name {
        product.name = name;
    }
    if let Some(description) = payload.description {
        product.description = description;
    }
    if let Some(price) = payload.price {
        product.price = price;
    }
    if let Some(image) = payload.image {
        product.image = image;
    }
    if let Some(stock) = payload.stock {
        product.stock = stock;
    }
    if let Some(active) = payload.active {
        product.active = active;
    }
    if let Some(category) = payload.category {
        product.category = category;
    }
    if let Some(unit) = payload.unit {
        product.unit = unit;
    }
    if let Some(supplier_id) = payload.supplier_id {
        product.supplier_id = supplier_id;
    }

    check_price_and_stock(product.price, product.stock)?;
    let updated = product.clone();
    state.store.commit(Collection::Products, &products).await?;

    Ok(ApiResponse::success("Updated", updated, Some(Meta::empty())))
}

/// Deletion is blocked while any sale line references the product, so
/// snapshotted line items keep pointing at a real record.
pub async fn delete_product(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let products: Vec<Product> = state.store.load(Collection::Products).await?;
    let sales: Vec<Sale> = state.store.load(Collection::Sales).await?;

    if sales
        .iter()
        .any(|s| s.items.iter().any(|item| item.product_id == id))
    {
        return Err(AppError::Conflict(
            "cannot delete product: referenced by existing sales".into(),
        ));
    }

    let before = products.len();
    let remaining: Vec<Product> = products.into_iter().filter(|p| p.id != id).collect();
    if remaining.len() == before {
        return Err(AppError::NotFound);
    }

    state.store.commit(Collection::Products, &remaining).await?;
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": id }),
        Some(Meta::empty()),
    ))
}

fn check_price_and_stock(price: f64, stock: i64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::BadRequest(
            "price must be a non-negative number".into(),
        ));
    }
    if stock < 0 {
        return Err(AppError::BadRequest(
            "stock must be a non-negative integer".into(),
        ));
    }
    Ok(())
}
