//! Payment endpoints of the payments service.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{OrderId, PaymentId};
use domain::{Payment, PaymentService};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: OrderId,
}

/// POST /payments: Records a payment for an order.
pub async fn create(
    State(payments): State<PaymentService>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = payments.create_payment(req.order_id).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// DELETE /payments/{id}: Deletes a payment.
pub async fn delete(
    State(payments): State<PaymentService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    payments.delete_payment(PaymentId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
