pub mod auth_routes;
pub mod catalog_routes;
pub mod category_routes;
pub mod order_routes;
pub mod product_routes;
pub mod user_routes;
