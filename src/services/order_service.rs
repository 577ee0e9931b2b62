use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::Product;
use crate::data::models::shipping::Shipping;
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::identity::Identity;
use crate::services::errors::OrderServiceError;
use bigdecimal::BigDecimal;

/// Order lifecycle states. Transitions only ever move forward, except the
/// buyer's explicit cancel out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states are the only ones a buyer may delete from.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Delivered)
    }

    fn rank(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Shipped => Some(2),
            OrderStatus::Delivered => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    /// Whether a seller may move an order from `self` to `next`.
    pub fn allows_advance_to(&self, next: OrderStatus) -> bool {
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Spending summary shown on the order history page, computed from the
/// loaded rows rather than a separate aggregate query.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_spent: BigDecimal,
    pub pending_amount: BigDecimal,
    pub cancelled_amount: BigDecimal,
}

pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        OrderService
    }

    /// Buyer's order history with shipping summaries, newest first.
    pub async fn list_orders(
        &self,
        identity: Identity,
    ) -> Result<(Vec<(Order, Option<Shipping>)>, OrderStats), OrderServiceError> {
        let repo = OrderRepo::new();

        let rows = repo
            .get_by_user_with_shipping(identity.user_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .unwrap_or_default();

        let mut stats = OrderStats {
            total_orders: rows.len(),
            total_spent: BigDecimal::from(0),
            pending_amount: BigDecimal::from(0),
            cancelled_amount: BigDecimal::from(0),
        };

        for (order, _) in &rows {
            match order.status.parse() {
                Ok(OrderStatus::Delivered) => stats.total_spent += &order.total_amount,
                Ok(OrderStatus::Pending) => stats.pending_amount += &order.total_amount,
                Ok(OrderStatus::Cancelled) => stats.cancelled_amount += &order.total_amount,
                _ => {}
            }
        }

        Ok((rows, stats))
    }

    /// Full order detail: the order, its line items with their products,
    /// and the shipping record. Only the owning buyer may look.
    pub async fn get_order(
        &self,
        identity: Identity,
        order_id: i32,
    ) -> Result<(Order, Vec<(OrderItem, Product)>, Option<Shipping>), OrderServiceError> {
        let repo = OrderRepo::new();

        let order = self.owned_order(&repo, identity, order_id).await?;

        let items = repo
            .get_items_with_products(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;
        let shipping = repo
            .get_shipping(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        Ok((order, items, shipping))
    }

    /// Cancels a pending order, restoring each product's stock and sales
    /// counters. Anything past pending is refused untouched.
    pub async fn cancel_order(
        &self,
        identity: Identity,
        order_id: i32,
    ) -> Result<(), OrderServiceError> {
        let repo = OrderRepo::new();

        let order = self.owned_order(&repo, identity, order_id).await?;

        match order.status.parse() {
            Ok(OrderStatus::Pending) => {}
            _ => return Err(OrderServiceError::NotCancellable),
        }

        match repo.cancel(order_id).await {
            Ok(Some(())) => {
                tracing::info!(order_id, "order cancelled");
                Ok(())
            }
            // Lost a race with a status change; nothing was modified.
            Ok(None) => Err(OrderServiceError::NotCancellable),
            Err(e) => {
                tracing::error!("order cancel failed: {}", e);
                Err(OrderServiceError::DatabaseError)
            }
        }
    }

    /// Deletes a terminal (cancelled or delivered) order along with its
    /// items and shipping record.
    pub async fn delete_order(
        &self,
        identity: Identity,
        order_id: i32,
    ) -> Result<(), OrderServiceError> {
        let repo = OrderRepo::new();

        let order = self.owned_order(&repo, identity, order_id).await?;

        let status: OrderStatus = order
            .status
            .parse()
            .map_err(|_| OrderServiceError::DatabaseError)?;
        if !status.is_terminal() {
            return Err(OrderServiceError::NotDeletable);
        }

        repo.delete_order(order_id).await.map_err(|e| {
            tracing::error!("order delete failed: {}", e);
            OrderServiceError::DatabaseError
        })?;

        tracing::info!(order_id, "order deleted");
        Ok(())
    }

    /// Seller-side progression: pending → confirmed → shipped → delivered,
    /// strictly forward. Only the seller of the ordered product may move it.
    pub async fn update_status(
        &self,
        identity: Identity,
        order_id: i32,
        new_status: OrderStatus,
    ) -> Result<(), OrderServiceError> {
        if !identity.is_seller() {
            return Err(OrderServiceError::PermissionDenied);
        }

        let repo = OrderRepo::new();

        let order = repo
            .get_by_id(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        let items = repo
            .get_items_with_products(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        if !items
            .iter()
            .all(|(_, product)| product.seller_id == identity.user_id)
        {
            return Err(OrderServiceError::PermissionDenied);
        }

        let current: OrderStatus = order
            .status
            .parse()
            .map_err(|_| OrderServiceError::DatabaseError)?;
        if !current.allows_advance_to(new_status) {
            return Err(OrderServiceError::InvalidStatusTransition);
        }

        repo.set_status(order_id, new_status.as_str())
            .await
            .map_err(|e| {
                tracing::error!("status update failed: {}", e);
                OrderServiceError::DatabaseError
            })?;

        tracing::info!(order_id, status = new_status.as_str(), "order status updated");
        Ok(())
    }

    /// Ownership gate shared by the buyer-facing operations: a missing
    /// order and someone else's order both end the request.
    async fn owned_order(
        &self,
        repo: &OrderRepo,
        identity: Identity,
        order_id: i32,
    ) -> Result<Order, OrderServiceError> {
        let order = repo
            .get_by_id(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        if order.user_id != identity.user_id {
            return Err(OrderServiceError::PermissionDenied);
        }

        Ok(order)
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}
