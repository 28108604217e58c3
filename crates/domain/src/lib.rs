//! Domain layer for the order, payment and delivery services.
//!
//! This crate provides:
//! - Entities shared by the three services
//! - Gateway ports implemented by persistence and HTTP adapters
//! - The transaction boundary used by the orders service
//! - The order-creation saga and its use case
//! - Payment and delivery use cases
//! - In-memory adapters for tests and database-less runs

pub mod delivery;
pub mod entities;
pub mod error;
pub mod gateways;
pub mod memory;
pub mod order;
pub mod payment;
pub mod transaction;

pub use delivery::DeliveryService;
pub use entities::{CreateOrderInput, Delivery, Order, Payment};
pub use error::{GatewayError, OrderError, TransactionError};
pub use gateways::{DeliveryGateway, HealthCheck, OrderPersistenceGateway, PaymentGateway};
pub use order::{CreateDeliveryStep, CreateOrderStep, CreateOrderUseCase, CreatePaymentStep};
pub use payment::PaymentService;
pub use transaction::{Transaction, TransactionManager, with_transaction};
