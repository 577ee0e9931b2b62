use crate::api::controllers::catalog_controller;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router {
    Router::new().route("/", get(catalog_controller::browse))
}
