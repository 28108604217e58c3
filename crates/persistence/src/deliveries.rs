use async_trait::async_trait;
use common::{DeliveryId, OrderId};
use domain::{Delivery, DeliveryGateway, GatewayError};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::error::database_error;

/// Deliveries table of the deliveries service.
#[derive(Clone)]
pub struct PgDeliveries {
    pool: PgPool,
}

impl PgDeliveries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_delivery(row: PgRow) -> Result<Delivery, sqlx::Error> {
        Ok(Delivery {
            id: DeliveryId::new(row.try_get("id")?),
            order_id: OrderId::new(row.try_get("order_id")?),
        })
    }
}

#[async_trait]
impl DeliveryGateway for PgDeliveries {
    #[tracing::instrument(skip(self))]
    async fn create_delivery(&self, order_id: OrderId) -> Result<Delivery, GatewayError> {
        let row =
            sqlx::query("INSERT INTO deliveries (order_id) VALUES ($1) RETURNING id, order_id")
                .bind(order_id.as_i64())
                .fetch_one(&self.pool)
                .await
                .map_err(database_error)?;

        Self::row_to_delivery(row).map_err(database_error)
    }
}
