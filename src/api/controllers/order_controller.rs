use crate::api::controllers::dto::order_dto::{
    OrderDetailResponse, OrderHistoryResponse, OrderItemResponse, OrderResponse,
    PlaceOrderRequest, PlaceOrderResponse, UpdateOrderStatusRequest,
};
use crate::security::identity::Identity;
use crate::services::checkout_service::CheckoutService;
use crate::services::errors::{CheckoutError, OrderServiceError};
use crate::services::order_service::{OrderService, OrderStatus};
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Direct checkout: one product, quantity, payment and shipping details.
pub async fn create_order(
    identity: Identity,
    Json(payload): Json<PlaceOrderRequest>,
) -> impl IntoResponse {
    let service = CheckoutService::new();

    match service.place_order(identity, payload.into()).await {
        Ok(order_id) => {
            let response = PlaceOrderResponse {
                order_id,
                message: format!("Order placed successfully! Order ID: #{}", order_id),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(
            e @ (CheckoutError::MissingField(_)
            | CheckoutError::InvalidQuantity { .. }
            | CheckoutError::ProductUnavailable
            | CheckoutError::InsufficientStock),
        ) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => {
            tracing::error!("checkout failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Order failed").into_response()
        }
    }
}

/// The buyer's order history plus spending summary.
pub async fn get_orders(identity: Identity) -> impl IntoResponse {
    let service = OrderService::new();

    match service.list_orders(identity).await {
        Ok((rows, stats)) => {
            let response = OrderHistoryResponse {
                stats: stats.into(),
                orders: rows.into_iter().map(OrderResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("order listing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

pub async fn get_order_by_id(identity: Identity, Path(order_id): Path<i32>) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_order(identity, order_id).await {
        Ok((order, items, shipping)) => {
            let response = OrderDetailResponse {
                order: OrderResponse::from((order, shipping)),
                items: items.into_iter().map(OrderItemResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

/// Buyer cancels a pending order; stock and sales counters roll back.
pub async fn cancel_order(identity: Identity, Path(order_id): Path<i32>) -> impl IntoResponse {
    let service = OrderService::new();

    match service.cancel_order(identity, order_id).await {
        Ok(()) => {
            let message = format!("Order #{} has been cancelled", order_id);
            (StatusCode::OK, message).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

/// Buyer prunes a cancelled or delivered order from their history.
pub async fn delete_order(identity: Identity, Path(order_id): Path<i32>) -> impl IntoResponse {
    let service = OrderService::new();

    match service.delete_order(identity, order_id).await {
        Ok(()) => {
            let message = format!("Order #{} has been deleted", order_id);
            (StatusCode::OK, message).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

/// Seller advances an order through its lifecycle.
pub async fn update_order_status(
    identity: Identity,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> impl IntoResponse {
    let service = OrderService::new();

    let new_status: OrderStatus = match payload.status.parse() {
        Ok(status) => status,
        Err(()) => return (StatusCode::BAD_REQUEST, "Unknown order status").into_response(),
    };

    match service.update_status(identity, order_id, new_status).await {
        Ok(()) => {
            let message = format!("Order #{} is now {}", order_id, new_status.as_str());
            (StatusCode::OK, message).into_response()
        }
        Err(e) => order_error_response(e),
    }
}

fn order_error_response(error: OrderServiceError) -> Response {
    match error {
        OrderServiceError::OrderNotFound => {
            (StatusCode::NOT_FOUND, error.to_string()).into_response()
        }
        OrderServiceError::PermissionDenied => {
            (StatusCode::FORBIDDEN, error.to_string()).into_response()
        }
        OrderServiceError::NotCancellable
        | OrderServiceError::NotDeletable
        | OrderServiceError::InvalidStatusTransition => {
            (StatusCode::CONFLICT, error.to_string()).into_response()
        }
        OrderServiceError::DatabaseError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
