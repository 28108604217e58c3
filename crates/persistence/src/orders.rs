use async_trait::async_trait;
use common::OrderId;
use domain::{GatewayError, Order, OrderPersistenceGateway};
use sqlx::{Row, postgres::PgRow};

use crate::error::database_error;
use crate::tx::PgTransaction;

/// Orders table of the orders service.
#[derive(Clone, Default)]
pub struct PgOrders;

impl PgOrders {
    pub fn new() -> Self {
        Self
    }

    fn row_to_order(row: PgRow) -> Result<Order, sqlx::Error> {
        Ok(Order::new(
            OrderId::new(row.try_get("id")?),
            row.try_get("amount")?,
        ))
    }
}

#[async_trait]
impl OrderPersistenceGateway for PgOrders {
    type Tx = PgTransaction;

    #[tracing::instrument(skip(self, tx))]
    async fn create_order(&self, tx: &mut PgTransaction, amount: i64) -> Result<Order, GatewayError> {
        let row = sqlx::query("INSERT INTO orders (amount) VALUES ($1) RETURNING id, amount")
            .bind(amount)
            .fetch_one(tx.connection())
            .await
            .map_err(database_error)?;

        Self::row_to_order(row).map_err(database_error)
    }
}
