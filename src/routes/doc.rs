use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        sales::{CreateSaleRequest, SaleItemRequest, SaleList},
        users::{RegisterRequest, UserList},
    },
    models::{Product, Sale, SaleItem, Supplier, User},
    response::{ApiResponse, Meta},
    routes::{auth, health, products, sales, suppliers, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        users::list_users,
        users::register,
        users::delete_user,
        suppliers::list_suppliers,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        sales::list_sales,
        sales::get_sale,
        sales::create_sale,
    ),
    components(
        schemas(
            User,
            Supplier,
            Product,
            Sale,
            SaleItem,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            UserList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateSaleRequest,
            SaleItemRequest,
            SaleList,
            suppliers::SupplierList,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Sale>,
            ApiResponse<SaleList>,
            ApiResponse<UserList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "User endpoints"),
        (name = "Suppliers", description = "Supplier endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Sales", description = "Sale endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
