use crate::api::controllers::order_controller;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn routes() -> Router {
    Router::new()
        .route("/", post(order_controller::create_order))
        .route("/", get(order_controller::get_orders))
        .route("/{id}", get(order_controller::get_order_by_id))
        .route("/{id}", delete(order_controller::delete_order))
        .route("/{id}/cancel", post(order_controller::cancel_order))
        .route("/{id}/status", put(order_controller::update_order_status))
}
