use crate::api::controllers::dto::category_dto::CategoryResponse;
use crate::services::category_service::CategoryService;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Leaf categories with their parent labels, for filters and the listing
/// form. Public.
pub async fn get_categories() -> impl IntoResponse {
    let service = CategoryService::new();

    match service.list_leaves().await {
        Ok(rows) => {
            let response: Vec<CategoryResponse> =
                rows.into_iter().map(CategoryResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("category listing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
