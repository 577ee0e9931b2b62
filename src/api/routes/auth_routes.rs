use crate::api::controllers::auth_controller;
use axum::Router;
use axum::routing::post;

pub fn routes() -> Router {
    Router::new()
        .route("/register", post(auth_controller::register))
        .route("/login", post(auth_controller::login))
}
