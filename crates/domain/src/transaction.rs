//! Atomic transaction boundary around a unit of work.

use std::future::Future;

use async_trait::async_trait;

use crate::error::TransactionError;

tokio::task_local! {
    static IN_TRANSACTION: ();
}

/// An open transaction.
#[async_trait]
pub trait Transaction: Send + Sized {
    async fn commit(self) -> Result<(), TransactionError>;

    async fn rollback(self) -> Result<(), TransactionError>;
}

/// Opens transactions against a data store.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    type Tx: Transaction;

    async fn begin(&self) -> Result<Self::Tx, TransactionError>;
}

/// Returns true when called from inside a [`with_transaction`] body.
pub fn in_transaction() -> bool {
    IN_TRANSACTION.try_with(|_| ()).is_ok()
}

/// Runs `body` inside a new transaction.
///
/// The body takes ownership of the transaction and hands it back together
/// with its result. An `Ok` result commits, an `Err` result rolls back. When
/// the rollback itself fails its error is returned instead of the body's.
/// If the body panics the transaction is dropped without being committed.
///
/// Fails with [`TransactionError::AlreadyActive`] when called from inside
/// another `with_transaction` body on the same task.
pub async fn with_transaction<M, F, Fut, T, E>(manager: &M, body: F) -> Result<T, E>
where
    M: TransactionManager + ?Sized,
    F: FnOnce(M::Tx) -> Fut,
    Fut: Future<Output = (M::Tx, Result<T, E>)>,
    E: From<TransactionError>,
{
    if in_transaction() {
        return Err(TransactionError::AlreadyActive.into());
    }

    let tx = manager.begin().await?;
    let (tx, result) = IN_TRANSACTION.scope((), body(tx)).await;

    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::error!(error = %rollback_error, "transaction rollback failed");
                return Err(rollback_error.into());
            }
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDatabase;

    #[derive(Debug, PartialEq)]
    enum BodyError {
        Failed,
        Transaction(TransactionError),
    }

    impl From<TransactionError> for BodyError {
        fn from(error: TransactionError) -> Self {
            BodyError::Transaction(error)
        }
    }

    #[tokio::test]
    async fn test_ok_body_commits() {
        let db = InMemoryDatabase::new();

        let result: Result<i32, BodyError> =
            with_transaction(&db, |tx| async move { (tx, Ok(7)) }).await;

        assert_eq!(result, Ok(7));
        assert_eq!(db.commit_count(), 1);
        assert_eq!(db.rollback_count(), 0);
    }

    #[tokio::test]
    async fn test_err_body_rolls_back() {
        let db = InMemoryDatabase::new();

        let result: Result<i32, BodyError> =
            with_transaction(&db, |tx| async move { (tx, Err(BodyError::Failed)) }).await;

        assert_eq!(result, Err(BodyError::Failed));
        assert_eq!(db.commit_count(), 0);
        assert_eq!(db.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_rollback_error_replaces_body_error() {
        let db = InMemoryDatabase::new();
        db.set_fail_on_rollback(true);

        let result: Result<i32, BodyError> =
            with_transaction(&db, |tx| async move { (tx, Err(BodyError::Failed)) }).await;

        assert!(matches!(
            result,
            Err(BodyError::Transaction(TransactionError::Rollback(_)))
        ));
    }

    #[tokio::test]
    async fn test_commit_error_is_returned() {
        let db = InMemoryDatabase::new();
        db.set_fail_on_commit(true);

        let result: Result<i32, BodyError> =
            with_transaction(&db, |tx| async move { (tx, Ok(1)) }).await;

        assert!(matches!(
            result,
            Err(BodyError::Transaction(TransactionError::Commit(_)))
        ));
    }

    #[tokio::test]
    async fn test_begin_error_skips_body() {
        let db = InMemoryDatabase::new();
        db.set_fail_on_begin(true);

        let mut ran = false;
        let result: Result<i32, BodyError> = with_transaction(&db, |tx| {
            ran = true;
            async move { (tx, Ok(1)) }
        })
        .await;

        assert!(!ran);
        assert!(matches!(
            result,
            Err(BodyError::Transaction(TransactionError::Begin(_)))
        ));
    }

    #[tokio::test]
    async fn test_nested_transaction_is_rejected() {
        let db = InMemoryDatabase::new();
        let inner_db = db.clone();

        let result: Result<Result<i32, BodyError>, BodyError> =
            with_transaction(&db, |tx| async move {
                let inner = with_transaction(&inner_db, |tx| async move { (tx, Ok(1)) }).await;
                (tx, Ok(inner))
            })
            .await;

        assert_eq!(
            result,
            Ok(Err(BodyError::Transaction(TransactionError::AlreadyActive)))
        );
        assert_eq!(db.commit_count(), 1);
    }

    #[tokio::test]
    async fn test_in_transaction_flag_is_scoped() {
        let db = InMemoryDatabase::new();
        assert!(!in_transaction());

        let result: Result<bool, BodyError> =
            with_transaction(&db, |tx| async move { (tx, Ok(in_transaction())) }).await;

        assert_eq!(result, Ok(true));
        assert!(!in_transaction());
    }
}
