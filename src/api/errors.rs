use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures raised before a handler body runs (extractors).
#[derive(Debug)]
pub enum APIErrors {
    Unauthorized,
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        match self {
            APIErrors::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Missing or invalid credentials").into_response()
            }
        }
    }
}
