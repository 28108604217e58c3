//! Order creation endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::{DeliveryId, OrderId, PaymentId};
use domain::{CreateOrderInput, CreateOrderUseCase, Order, OrderError, TransactionManager};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The order-creation capability the handler depends on.
#[async_trait]
pub trait OrderCreator: Send + Sync {
    async fn create_order(&self, input: CreateOrderInput) -> Result<Order, OrderError>;
}

#[async_trait]
impl<M> OrderCreator for CreateOrderUseCase<M>
where
    M: TransactionManager + 'static,
    M::Tx: 'static,
{
    async fn create_order(&self, input: CreateOrderInput) -> Result<Order, OrderError> {
        CreateOrderUseCase::create_order(self, input).await
    }
}

#[derive(Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub amount: i64,
    pub payment_id: Option<PaymentId>,
    pub delivery_id: Option<DeliveryId>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            amount: order.amount,
            payment_id: order.payment_id,
            delivery_id: order.delivery_id,
        }
    }
}

/// POST /orders: Creates an order with its payment and delivery.
pub async fn create(
    State(orders): State<Arc<dyn OrderCreator>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = orders
        .create_order(CreateOrderInput { amount: req.amount })
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}
