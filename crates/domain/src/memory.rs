//! In-memory adapters for every port.
//!
//! Used by tests and by the service binaries when no database is configured.
//! Each adapter is cheap to clone; clones share state, so a test can keep a
//! handle to inspect what a use case did.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use common::{DeliveryId, OrderId, PaymentId};

use crate::entities::{Delivery, Order, Payment};
use crate::error::{GatewayError, TransactionError};
use crate::gateways::{DeliveryGateway, HealthCheck, OrderPersistenceGateway, PaymentGateway};
use crate::transaction::{Transaction, TransactionManager};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct DatabaseState {
    orders: BTreeMap<OrderId, Order>,
    last_order_id: i64,
    commits: usize,
    rollbacks: usize,
    fail_on_begin: bool,
    fail_on_commit: bool,
    fail_on_rollback: bool,
    fail_on_insert: bool,
    unhealthy: bool,
}

/// In-memory orders database with transactions.
///
/// Orders written through a transaction become visible only once it commits.
/// Ids are handed out at insert time and are not reused after a rollback.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<RwLock<DatabaseState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed orders, ordered by id.
    pub fn orders(&self) -> Vec<Order> {
        read(&self.state).orders.values().cloned().collect()
    }

    pub fn order_count(&self) -> usize {
        read(&self.state).orders.len()
    }

    pub fn commit_count(&self) -> usize {
        read(&self.state).commits
    }

    pub fn rollback_count(&self) -> usize {
        read(&self.state).rollbacks
    }

    pub fn set_fail_on_begin(&self, fail: bool) {
        write(&self.state).fail_on_begin = fail;
    }

    pub fn set_fail_on_commit(&self, fail: bool) {
        write(&self.state).fail_on_commit = fail;
    }

    pub fn set_fail_on_rollback(&self, fail: bool) {
        write(&self.state).fail_on_rollback = fail;
    }

    /// Configures order inserts to fail.
    pub fn set_fail_on_insert(&self, fail: bool) {
        write(&self.state).fail_on_insert = fail;
    }

    /// Makes the health check report the database as unreachable.
    pub fn set_unhealthy(&self, unhealthy: bool) {
        write(&self.state).unhealthy = unhealthy;
    }
}

/// A transaction on an [`InMemoryDatabase`].
///
/// Dropping it without committing discards its writes.
#[derive(Debug)]
pub struct InMemoryTransaction {
    state: Arc<RwLock<DatabaseState>>,
    staged: Vec<Order>,
}

impl InMemoryTransaction {
    /// Returns the orders written in this transaction so far.
    pub fn staged(&self) -> &[Order] {
        &self.staged
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> Result<(), TransactionError> {
        let mut state = write(&self.state);
        if state.fail_on_commit {
            return Err(TransactionError::Commit("connection lost".to_string()));
        }

        state.commits += 1;
        for order in self.staged {
            state.orders.insert(order.id, order);
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), TransactionError> {
        let mut state = write(&self.state);
        if state.fail_on_rollback {
            return Err(TransactionError::Rollback("connection lost".to_string()));
        }

        state.rollbacks += 1;
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for InMemoryDatabase {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, TransactionError> {
        if read(&self.state).fail_on_begin {
            return Err(TransactionError::Begin("connection refused".to_string()));
        }

        Ok(InMemoryTransaction {
            state: self.state.clone(),
            staged: Vec::new(),
        })
    }
}

#[async_trait]
impl OrderPersistenceGateway for InMemoryDatabase {
    type Tx = InMemoryTransaction;

    async fn create_order(
        &self,
        tx: &mut InMemoryTransaction,
        amount: i64,
    ) -> Result<Order, GatewayError> {
        let id = {
            let mut state = write(&self.state);
            if state.fail_on_insert {
                return Err(GatewayError::Database("insert into orders failed".to_string()));
            }
            state.last_order_id += 1;
            OrderId::new(state.last_order_id)
        };

        let order = Order::new(id, amount);
        tx.staged.push(order.clone());
        Ok(order)
    }
}

#[async_trait]
impl HealthCheck for InMemoryDatabase {
    async fn check(&self) -> Result<(), GatewayError> {
        if read(&self.state).unhealthy {
            return Err(GatewayError::Database("database unreachable".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PaymentsState {
    payments: BTreeMap<PaymentId, Payment>,
    last_id: i64,
    created: Vec<Payment>,
    deleted: Vec<PaymentId>,
    fail_on_create: bool,
    fail_on_delete: bool,
}

/// In-memory payments store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayments {
    state: Arc<RwLock<PaymentsState>>,
}

impl InMemoryPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures payment creation to fail.
    pub fn set_fail_on_create(&self, fail: bool) {
        write(&self.state).fail_on_create = fail;
    }

    /// Configures payment deletion to fail.
    pub fn set_fail_on_delete(&self, fail: bool) {
        write(&self.state).fail_on_delete = fail;
    }

    /// Returns the payments that currently exist.
    pub fn payments(&self) -> Vec<Payment> {
        read(&self.state).payments.values().copied().collect()
    }

    pub fn payment_count(&self) -> usize {
        read(&self.state).payments.len()
    }

    /// Returns every payment ever created, including deleted ones.
    pub fn created(&self) -> Vec<Payment> {
        read(&self.state).created.clone()
    }

    /// Returns the ids passed to successful deletions, in call order.
    pub fn deleted(&self) -> Vec<PaymentId> {
        read(&self.state).deleted.clone()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPayments {
    async fn create_payment(&self, order_id: OrderId) -> Result<Payment, GatewayError> {
        let mut state = write(&self.state);
        if state.fail_on_create {
            return Err(GatewayError::PaymentService("payment declined".to_string()));
        }

        state.last_id += 1;
        let payment = Payment {
            id: PaymentId::new(state.last_id),
            order_id,
        };
        state.payments.insert(payment.id, payment);
        state.created.push(payment);
        Ok(payment)
    }

    /// Deleting an unknown payment succeeds.
    async fn delete_payment(&self, payment_id: PaymentId) -> Result<(), GatewayError> {
        let mut state = write(&self.state);
        if state.fail_on_delete {
            return Err(GatewayError::PaymentService(format!(
                "cannot delete payment {payment_id}"
            )));
        }

        state.payments.remove(&payment_id);
        state.deleted.push(payment_id);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct DeliveriesState {
    deliveries: BTreeMap<DeliveryId, Delivery>,
    last_id: i64,
    fail_on_create: bool,
}

/// In-memory deliveries store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveries {
    state: Arc<RwLock<DeliveriesState>>,
}

impl InMemoryDeliveries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures delivery creation to fail.
    pub fn set_fail_on_create(&self, fail: bool) {
        write(&self.state).fail_on_create = fail;
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        read(&self.state).deliveries.values().copied().collect()
    }

    pub fn delivery_count(&self) -> usize {
        read(&self.state).deliveries.len()
    }
}

#[async_trait]
impl DeliveryGateway for InMemoryDeliveries {
    async fn create_delivery(&self, order_id: OrderId) -> Result<Delivery, GatewayError> {
        let mut state = write(&self.state);
        if state.fail_on_create {
            return Err(GatewayError::DeliveryService("no courier available".to_string()));
        }

        state.last_id += 1;
        let delivery = Delivery {
            id: DeliveryId::new(state.last_id),
            order_id,
        };
        state.deliveries.insert(delivery.id, delivery);
        Ok(delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_committed_orders_become_visible() {
        let db = InMemoryDatabase::new();
        let mut tx = db.begin().await.unwrap();

        let order = db.create_order(&mut tx, 250).await.unwrap();
        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(tx.staged().len(), 1);
        assert_eq!(db.order_count(), 0);

        tx.commit().await.unwrap();
        assert_eq!(db.orders(), vec![order]);
        assert_eq!(db.commit_count(), 1);
    }

    #[tokio::test]
    async fn test_rolled_back_orders_are_discarded() {
        let db = InMemoryDatabase::new();
        let mut tx = db.begin().await.unwrap();
        db.create_order(&mut tx, 250).await.unwrap();

        tx.rollback().await.unwrap();
        assert_eq!(db.order_count(), 0);
        assert_eq!(db.rollback_count(), 1);

        let mut tx = db.begin().await.unwrap();
        let order = db.create_order(&mut tx, 300).await.unwrap();
        assert_eq!(order.id, OrderId::new(2));
    }

    #[tokio::test]
    async fn test_dropped_transaction_writes_nothing() {
        let db = InMemoryDatabase::new();
        {
            let mut tx = db.begin().await.unwrap();
            db.create_order(&mut tx, 10).await.unwrap();
        }
        assert_eq!(db.order_count(), 0);
        assert_eq!(db.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_insert_failure() {
        let db = InMemoryDatabase::new();
        db.set_fail_on_insert(true);
        let mut tx = db.begin().await.unwrap();

        let result = db.create_order(&mut tx, 10).await;
        assert!(matches!(result, Err(GatewayError::Database(_))));
    }

    #[tokio::test]
    async fn test_health_check() {
        let db = InMemoryDatabase::new();
        assert!(db.check().await.is_ok());

        db.set_unhealthy(true);
        assert!(db.check().await.is_err());
    }

    #[tokio::test]
    async fn test_create_and_delete_payment() {
        let payments = InMemoryPayments::new();

        let payment = payments.create_payment(OrderId::new(5)).await.unwrap();
        assert_eq!(payment.id, PaymentId::new(1));
        assert_eq!(payment.order_id, OrderId::new(5));
        assert_eq!(payments.payment_count(), 1);

        payments.delete_payment(payment.id).await.unwrap();
        assert_eq!(payments.payment_count(), 0);
        assert_eq!(payments.created(), vec![payment]);
        assert_eq!(payments.deleted(), vec![payment.id]);
    }

    #[tokio::test]
    async fn test_payment_failures() {
        let payments = InMemoryPayments::new();
        payments.set_fail_on_create(true);
        assert!(payments.create_payment(OrderId::new(1)).await.is_err());
        assert!(payments.created().is_empty());

        payments.set_fail_on_delete(true);
        assert!(payments.delete_payment(PaymentId::new(1)).await.is_err());
        assert!(payments.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_sequential_delivery_ids() {
        let deliveries = InMemoryDeliveries::new();

        let first = deliveries.create_delivery(OrderId::new(1)).await.unwrap();
        let second = deliveries.create_delivery(OrderId::new(2)).await.unwrap();

        assert_eq!(first.id, DeliveryId::new(1));
        assert_eq!(second.id, DeliveryId::new(2));
        assert_eq!(deliveries.delivery_count(), 2);
    }

    #[tokio::test]
    async fn test_delivery_failure() {
        let deliveries = InMemoryDeliveries::new();
        deliveries.set_fail_on_create(true);

        let result = deliveries.create_delivery(OrderId::new(1)).await;
        assert!(matches!(result, Err(GatewayError::DeliveryService(_))));
        assert!(deliveries.deliveries().is_empty());
    }
}
