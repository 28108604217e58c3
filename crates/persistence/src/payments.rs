use async_trait::async_trait;
use common::{OrderId, PaymentId};
use domain::{GatewayError, Payment, PaymentGateway};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::error::database_error;

/// Payments table of the payments service.
#[derive(Clone)]
pub struct PgPayments {
    pool: PgPool,
}

impl PgPayments {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: PgRow) -> Result<Payment, sqlx::Error> {
        Ok(Payment {
            id: PaymentId::new(row.try_get("id")?),
            order_id: OrderId::new(row.try_get("order_id")?),
        })
    }
}

#[async_trait]
impl PaymentGateway for PgPayments {
    #[tracing::instrument(skip(self))]
    async fn create_payment(&self, order_id: OrderId) -> Result<Payment, GatewayError> {
        let row = sqlx::query("INSERT INTO payments (order_id) VALUES ($1) RETURNING id, order_id")
            .bind(order_id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Self::row_to_payment(row).map_err(database_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_payment(&self, payment_id: PaymentId) -> Result<(), GatewayError> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(payment_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(())
    }
}
