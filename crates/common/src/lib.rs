//! Shared types used across the order, payment and delivery services.

pub mod types;

pub use types::{DeliveryId, OrderId, PaymentId};
