//! Ports the use cases depend on.
//!
//! Implemented by the Postgres adapters, the HTTP client gateways and the
//! in-memory adapters in [`crate::memory`].

use async_trait::async_trait;
use common::{OrderId, PaymentId};

use crate::entities::{Delivery, Order, Payment};
use crate::error::GatewayError;

/// Persists orders inside an open transaction.
#[async_trait]
pub trait OrderPersistenceGateway: Send + Sync {
    /// Transaction handle the write is performed in.
    type Tx: Send;

    /// Inserts an order for the amount and returns it with its new id.
    async fn create_order(&self, tx: &mut Self::Tx, amount: i64) -> Result<Order, GatewayError>;
}

/// Creates and deletes payments.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment(&self, order_id: OrderId) -> Result<Payment, GatewayError>;

    async fn delete_payment(&self, payment_id: PaymentId) -> Result<(), GatewayError>;
}

/// Creates deliveries.
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    async fn create_delivery(&self, order_id: OrderId) -> Result<Delivery, GatewayError>;
}

/// Reports whether a backing store is reachable.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> Result<(), GatewayError>;
}
