use crate::api::controllers::user_controller;
use axum::Router;
use axum::routing::{get, put};

pub fn routes() -> Router {
    Router::new()
        .route("/profile", get(user_controller::get_profile))
        .route("/profile", put(user_controller::update_profile))
        .route("/password", put(user_controller::change_password))
        .route("/dashboard", get(user_controller::dashboard))
}
