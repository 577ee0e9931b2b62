use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::Product;
use crate::data::models::shipping::Shipping;
use crate::services::order_service::OrderStats;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    pub product_id: i32,
    pub quantity: i32,
    pub payment_method: String,
    pub shipping_address: String,
    pub phone: String,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: i32,
    pub message: String,
}

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ShippingResponse {
    pub shipping_address: String,
    pub phone: String,
    pub status: String,
    pub shipping_cost: BigDecimal,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<String>,
    pub actual_delivery: Option<String>,
}

impl From<Shipping> for ShippingResponse {
    fn from(shipping: Shipping) -> Self {
        Self {
            shipping_address: shipping.shipping_address,
            phone: shipping.phone,
            status: shipping.status,
            shipping_cost: shipping.shipping_cost,
            tracking_number: shipping.tracking_number,
            estimated_delivery: shipping.estimated_delivery.map(|d| d.to_string()),
            actual_delivery: shipping.actual_delivery.map(|d| d.to_string()),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: i32,
    pub total_amount: BigDecimal,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub order_date: Option<String>,
    pub shipping: Option<ShippingResponse>,
}

impl From<(Order, Option<Shipping>)> for OrderResponse {
    fn from((order, shipping): (Order, Option<Shipping>)) -> Self {
        Self {
            order_id: order.order_id,
            total_amount: order.total_amount,
            status: order.status,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            notes: order.notes,
            order_date: order.order_date.map(|dt| dt.to_string()),
            shipping: shipping.map(ShippingResponse::from),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub product_name: String,
    pub brand: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

impl From<(OrderItem, Product)> for OrderItemResponse {
    fn from((item, product): (OrderItem, Product)) -> Self {
        let line_total = &item.unit_price * BigDecimal::from(item.quantity);
        Self {
            product_id: product.product_id,
            product_name: product.name,
            brand: product.brand,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Serialize, Deserialize)]
pub struct OrderStatsResponse {
    pub total_orders: usize,
    pub total_spent: BigDecimal,
    pub pending_amount: BigDecimal,
    pub cancelled_amount: BigDecimal,
}

impl From<OrderStats> for OrderStatsResponse {
    fn from(stats: OrderStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            total_spent: stats.total_spent,
            pending_amount: stats.pending_amount,
            cancelled_amount: stats.cancelled_amount,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct OrderHistoryResponse {
    pub stats: OrderStatsResponse,
    pub orders: Vec<OrderResponse>,
}
