//! Payment use cases, served by the payments service.

use std::sync::Arc;

use common::{OrderId, PaymentId};

use crate::entities::Payment;
use crate::error::GatewayError;
use crate::gateways::PaymentGateway;

/// Creates and deletes payments in the payments store.
#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn PaymentGateway>) -> Self {
        Self { store }
    }

    /// Records a payment for the order.
    #[tracing::instrument(skip(self))]
    pub async fn create_payment(&self, order_id: OrderId) -> Result<Payment, GatewayError> {
        let payment = self.store.create_payment(order_id).await?;
        metrics::counter!("payments_created_total").increment(1);
        tracing::info!(payment_id = %payment.id, "payment created");
        Ok(payment)
    }

    /// Deletes a payment. Deleting a payment that does not exist succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn delete_payment(&self, payment_id: PaymentId) -> Result<(), GatewayError> {
        self.store.delete_payment(payment_id).await?;
        metrics::counter!("payments_deleted_total").increment(1);
        tracing::info!("payment deleted");
        Ok(())
    }
}
