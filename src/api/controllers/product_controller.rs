use crate::api::controllers::dto::product_dto::{ProductFormRequest, ProductResponse};
use crate::security::identity::Identity;
use crate::services::errors::ProductServiceError;
use crate::services::product_service::{ProductService, RetireOutcome};
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Seller's own listings, retired ones included.
pub async fn my_products(identity: Identity) -> impl IntoResponse {
    let service = ProductService::new();

    match service.my_products(identity).await {
        Ok(rows) => {
            let response: Vec<ProductResponse> =
                rows.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => product_error_response(e),
    }
}

pub async fn create_product(
    identity: Identity,
    Json(payload): Json<ProductFormRequest>,
) -> impl IntoResponse {
    let service = ProductService::new();

    match service.create_product(identity, (&payload).into()).await {
        Ok(product_id) => {
            let message = format!("Product added successfully! Product ID: #{}", product_id);
            (StatusCode::CREATED, message).into_response()
        }
        Err(e) => product_error_response(e),
    }
}

pub async fn update_product(
    identity: Identity,
    Path(product_id): Path<i32>,
    Json(payload): Json<ProductFormRequest>,
) -> impl IntoResponse {
    let service = ProductService::new();
    let is_available = payload.is_available.unwrap_or(true);

    match service
        .update_product(identity, product_id, (&payload).into(), is_available)
        .await
    {
        Ok(()) => (StatusCode::OK, "Product updated successfully").into_response(),
        Err(e) => product_error_response(e),
    }
}

/// Retires a listing: soft when order history references it, hard delete
/// otherwise.
pub async fn delete_product(identity: Identity, Path(product_id): Path<i32>) -> impl IntoResponse {
    let service = ProductService::new();

    match service.retire_product(identity, product_id).await {
        Ok(RetireOutcome::Retired) => (
            StatusCode::OK,
            "Product has been marked as unavailable because it has existing orders",
        )
            .into_response(),
        Ok(RetireOutcome::Deleted) => {
            (StatusCode::OK, "Product has been deleted successfully").into_response()
        }
        Err(e) => product_error_response(e),
    }
}

fn product_error_response(error: ProductServiceError) -> Response {
    match error {
        ProductServiceError::ProductNotFound => {
            (StatusCode::NOT_FOUND, error.to_string()).into_response()
        }
        ProductServiceError::PermissionDenied => {
            (StatusCode::FORBIDDEN, error.to_string()).into_response()
        }
        ProductServiceError::MissingField(_)
        | ProductServiceError::InvalidPrice
        | ProductServiceError::InvalidStock
        | ProductServiceError::InvalidCondition
        | ProductServiceError::InvalidCategory => {
            (StatusCode::BAD_REQUEST, error.to_string()).into_response()
        }
        ProductServiceError::DatabaseError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
