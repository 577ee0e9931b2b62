use crate::api::controllers::dto::product_dto::{CatalogQuery, ProductResponse};
use crate::services::catalog_service::CatalogService;
use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Public browse/search over available listings. No login required.
pub async fn browse(Query(query): Query<CatalogQuery>) -> impl IntoResponse {
    let service = CatalogService::new();

    match service.browse(query.into()).await {
        Ok(rows) => {
            let response: Vec<ProductResponse> =
                rows.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("catalog browse failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
