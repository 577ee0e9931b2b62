use crate::data::models::order::NewOrder;
use crate::data::models::product::Condition;
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::identity::Identity;
use crate::services::errors::CheckoutError;
use crate::services::order_service::OrderStatus;
use crate::services::pricing::{flat_shipping_fee, ConditionDiscount, DiscountPolicy};
use bigdecimal::BigDecimal;

/// Direct-checkout input, one product per order.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub product_id: i32,
    pub quantity: i32,
    pub payment_method: String,
    pub shipping_address: String,
    pub phone: String,
    pub notes: Option<String>,
}

pub struct CheckoutService {
    policy: Box<dyn DiscountPolicy>,
}

impl CheckoutService {
    pub fn new() -> Self {
        CheckoutService {
            policy: Box::new(ConditionDiscount),
        }
    }

    pub fn with_policy(policy: Box<dyn DiscountPolicy>) -> Self {
        CheckoutService { policy }
    }

    /// Places an order for an authenticated buyer.
    ///
    /// Everything user-correctable is rejected before a single row is
    /// written. The writes themselves (order, line item, stock decrement,
    /// shipping record) run inside one transaction in the repo, so a
    /// failure anywhere leaves no trace. Single attempt, no retries.
    pub async fn place_order(
        &self,
        identity: Identity,
        request: PlaceOrder,
    ) -> Result<i32, CheckoutError> {
        if request.payment_method.trim().is_empty() {
            return Err(CheckoutError::MissingField("payment_method"));
        }
        if request.shipping_address.trim().is_empty() {
            return Err(CheckoutError::MissingField("shipping_address"));
        }
        if request.phone.trim().is_empty() {
            return Err(CheckoutError::MissingField("phone"));
        }

        let product_repo = ProductRepo::new();
        let product = product_repo
            .get_by_id(request.product_id)
            .await
            .map_err(|_| CheckoutError::DatabaseError)?
            .ok_or(CheckoutError::ProductUnavailable)?;

        if !product.is_available || product.stock_quantity <= 0 {
            return Err(CheckoutError::ProductUnavailable);
        }
        if request.quantity < 1 || request.quantity > product.stock_quantity {
            return Err(CheckoutError::InvalidQuantity {
                available: product.stock_quantity,
            });
        }

        let condition: Condition = product
            .condition
            .parse()
            .map_err(|_| CheckoutError::DatabaseError)?;

        // The charged unit price is the discounted one; it gets snapshotted
        // on the line item and never recomputed.
        let unit_price = self.policy.unit_price(&product.price, condition);
        let subtotal = &unit_price * BigDecimal::from(request.quantity);
        let shipping_fee = flat_shipping_fee();
        let grand_total = subtotal + &shipping_fee;

        let new_order = NewOrder {
            user_id: identity.user_id,
            total_amount: grand_total,
            status: OrderStatus::Pending.as_str(),
            payment_method: &request.payment_method,
            notes: request.notes.as_deref(),
        };

        let order_repo = OrderRepo::new();
        match order_repo
            .place_order(
                new_order,
                product.product_id,
                request.quantity,
                unit_price,
                &request.shipping_address,
                &request.phone,
                shipping_fee,
            )
            .await
        {
            Ok(Some(order_id)) => {
                tracing::info!(order_id, buyer = identity.user_id, "order placed");
                Ok(order_id)
            }
            Ok(None) => Err(CheckoutError::InsufficientStock),
            Err(e) => {
                tracing::error!("order placement failed: {}", e);
                Err(CheckoutError::DatabaseError)
            }
        }
    }
}

impl Default for CheckoutService {
    fn default() -> Self {
        Self::new()
    }
}
