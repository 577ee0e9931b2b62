use crate::api::config::Config;
use crate::api::routes::{
    auth_routes, catalog_routes, category_routes, order_routes, product_routes, user_routes,
};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub async fn start() {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api", get(|| async { "Marketplace API is running!" }))
        .nest("/api/v1/auth", auth_routes::routes())
        .nest("/api/v1/catalog", catalog_routes::routes())
        .nest("/api/v1/categories", category_routes::routes())
        .nest("/api/v1/products", product_routes::routes())
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/users", user_routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let addr = Config::default().bind_addr;
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start the server");
}
