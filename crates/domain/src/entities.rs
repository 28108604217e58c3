//! Entities exchanged between the services.

use common::{DeliveryId, OrderId, PaymentId};
use serde::{Deserialize, Serialize};

/// An order and the remote resources created for it.
///
/// `payment_id` and `delivery_id` are filled in as the order-creation saga
/// progresses; a fully created order has both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub amount: i64,
    pub payment_id: Option<PaymentId>,
    pub delivery_id: Option<DeliveryId>,
}

impl Order {
    /// Creates a freshly persisted order with no payment or delivery yet.
    pub fn new(id: OrderId, amount: i64) -> Self {
        Self {
            id,
            amount,
            payment_id: None,
            delivery_id: None,
        }
    }
}

/// A payment recorded by the payments service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
}

/// A delivery recorded by the deliveries service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub order_id: OrderId,
}

/// Input of the order-creation use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderInput {
    /// Order amount in the smallest currency unit.
    pub amount: i64,
}
