//! Order creation: the saga steps and the use case that runs them.

mod steps;
mod use_case;

pub use steps::{CreateDeliveryStep, CreateOrderStep, CreatePaymentStep};
pub use use_case::{CREATE_ORDER_SAGA, CreateOrderUseCase};
