pub mod auth_service;
pub mod catalog;
pub mod product_service;
pub mod sale_service;
pub mod user_service;
