use async_trait::async_trait;
use domain::{Transaction, TransactionError, TransactionManager};
use sqlx::{PgConnection, PgPool, Postgres};

/// Opens transactions on a PostgreSQL pool.
#[derive(Clone)]
pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// An open PostgreSQL transaction.
///
/// Dropping it without committing rolls it back.
pub struct PgTransaction(sqlx::Transaction<'static, Postgres>);

impl PgTransaction {
    /// Returns the connection the transaction runs on.
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut *self.0
    }
}

#[async_trait]
impl Transaction for PgTransaction {
    async fn commit(self) -> Result<(), TransactionError> {
        self.0
            .commit()
            .await
            .map_err(|e| TransactionError::Commit(e.to_string()))
    }

    async fn rollback(self) -> Result<(), TransactionError> {
        self.0
            .rollback()
            .await
            .map_err(|e| TransactionError::Rollback(e.to_string()))
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    type Tx = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction, TransactionError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TransactionError::Begin(e.to_string()))?;
        Ok(PgTransaction(tx))
    }
}
