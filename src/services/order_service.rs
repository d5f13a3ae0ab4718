use crate::data::models::book::Book;
use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::data::repos::implementors::order_repo::{OrderPlacementError, OrderRepo};
use crate::services::errors::OrderServiceError;

pub const MIN_ADDRESS_LEN: usize = 10;

/// Order lifecycle states. Placement only ever produces Pending; the rest
/// are reached through update_order_status.
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

    /// pending -> confirmed -> shipped -> delivered, with cancellation
    /// allowed out of pending or confirmed only.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Confirmed, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
        )
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

pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        OrderService
    }

    /// The checkout core: turns the caller's cart into a pending order with
    /// frozen line prices, all inside one transaction. See
    /// OrderRepo::place_from_cart for the transactional steps.
    pub async fn place_order(
        &self,
        user_id: i32,
        shipping_address: &str,
    ) -> Result<Order, OrderServiceError> {
        if shipping_address.trim().len() < MIN_ADDRESS_LEN {
            return Err(OrderServiceError::AddressTooShort);
        }

        OrderRepo::new()
            .place_from_cart(user_id, shipping_address)
            .await
            .map_err(|e| match e {
                OrderPlacementError::EmptyCart => OrderServiceError::EmptyCart,
                OrderPlacementError::InsufficientStock(titles) => {
                    OrderServiceError::InsufficientStock(titles)
                }
                OrderPlacementError::Database(err) => {
                    tracing::error!("order placement failed: {}", err);
                    OrderServiceError::DatabaseError
                }
            })
    }

    /// The caller's orders, newest first, each with its line items.
    pub async fn list_orders(
        &self,
        user_id: i32,
    ) -> Result<Vec<(Order, Vec<(OrderItem, Book)>)>, OrderServiceError> {
        let repo = OrderRepo::new();

        let orders = repo
            .get_by_user(user_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        repo.attach_items(orders)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)
    }

    /// Owner-scoped lookup; orders belonging to someone else read as absent.
    pub async fn get_order(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<Option<(Order, Vec<(OrderItem, Book)>)>, OrderServiceError> {
        let repo = OrderRepo::new();

        let order = repo
            .get_owned(order_id, user_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        match order {
            Some(o) => {
                let mut with_items = repo
                    .attach_items(vec![o])
                    .await
                    .map_err(|_| OrderServiceError::DatabaseError)?;
                Ok(with_items.pop())
            }
            None => Ok(None),
        }
    }

    /// Admin-side status walk along the lifecycle state machine. Placement
    /// never calls this.
    pub async fn update_order_status(
        &self,
        order_id: i32,
        new_status: OrderStatus,
    ) -> Result<Order, OrderServiceError> {
        let repo = OrderRepo::new();

        let order = repo
            .get_by_id(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        let current: OrderStatus = order
            .status
            .parse()
            .map_err(|_| OrderServiceError::InvalidStatus)?;

        if !current.can_transition_to(new_status) {
            return Err(OrderServiceError::InvalidStatusTransition);
        }

        repo.set_status(order_id, new_status.as_str())
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        repo.get_by_id(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}
