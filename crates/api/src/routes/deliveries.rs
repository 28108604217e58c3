//! Delivery endpoint of the deliveries service.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::OrderId;
use domain::{Delivery, DeliveryService};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeliveryRequest {
    pub order_id: OrderId,
}

/// POST /deliveries: Creates a delivery for an order.
pub async fn create(
    State(deliveries): State<DeliveryService>,
    Json(req): Json<CreateDeliveryRequest>,
) -> Result<(StatusCode, Json<Delivery>), ApiError> {
    let delivery = deliveries.create_delivery(req.order_id).await?;
    Ok((StatusCode::CREATED, Json(delivery)))
}
