//! Domain error types.

use thiserror::Error;

/// Errors returned by gateway ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The local database rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(String),

    /// The payments service failed or could not be reached.
    #[error("Payment service error: {0}")]
    PaymentService(String),

    /// The deliveries service failed or could not be reached.
    #[error("Delivery service error: {0}")]
    DeliveryService(String),
}

/// Errors raised by the transaction boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A transaction was requested while one is already open on this task.
    #[error("already in transaction")]
    AlreadyActive,

    #[error("cannot begin a transaction: {0}")]
    Begin(String),

    #[error("cannot commit the transaction: {0}")]
    Commit(String),

    #[error("cannot roll back the transaction: {0}")]
    Rollback(String),
}

/// Errors returned by the order-creation use case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The saga failed. Step details are logged, never returned.
    #[error("could not create order")]
    CreationFailed,

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_failure_message_is_generic() {
        assert_eq!(OrderError::CreationFailed.to_string(), "could not create order");
    }

    #[test]
    fn transaction_errors_convert_into_order_errors() {
        let error: OrderError = TransactionError::AlreadyActive.into();
        assert_eq!(error, OrderError::Transaction(TransactionError::AlreadyActive));
        assert_eq!(error.to_string(), "Transaction error: already in transaction");
    }
}
