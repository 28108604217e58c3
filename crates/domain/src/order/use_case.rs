//! The order-creation use case.

use std::sync::Arc;

use saga::Saga;

use super::steps::{CreateDeliveryStep, CreateOrderStep, CreatePaymentStep};
use crate::entities::{CreateOrderInput, Order};
use crate::error::{GatewayError, OrderError};
use crate::gateways::{DeliveryGateway, OrderPersistenceGateway, PaymentGateway};
use crate::transaction::{TransactionManager, with_transaction};

/// Name of the order-creation saga in logs and metrics.
pub const CREATE_ORDER_SAGA: &str = "create_order";

/// Creates an order, its payment and its delivery as one unit.
///
/// The saga runs inside a local transaction: when any step fails, completed
/// remote steps are compensated and the order insert is rolled back. The
/// caller only learns that creation failed; step errors go to the log.
pub struct CreateOrderUseCase<M: TransactionManager> {
    transactions: Arc<M>,
    saga: Saga<CreateOrderInput, Order, M::Tx, GatewayError>,
}

impl<M> CreateOrderUseCase<M>
where
    M: TransactionManager + 'static,
    M::Tx: 'static,
{
    /// Builds the saga once; every call to [`create_order`](Self::create_order)
    /// runs a fresh coordinator over it.
    pub fn new<P>(
        transactions: Arc<M>,
        orders: Arc<P>,
        payments: Arc<dyn PaymentGateway>,
        deliveries: Arc<dyn DeliveryGateway>,
    ) -> Self
    where
        P: OrderPersistenceGateway<Tx = M::Tx> + 'static,
    {
        let saga = saga::SagaBuilder::new(CREATE_ORDER_SAGA)
            .then(CreateOrderStep::new(orders))
            .then(CreatePaymentStep::new(payments))
            .then(CreateDeliveryStep::new(deliveries))
            .build();

        Self { transactions, saga }
    }

    /// Returns the saga this use case runs.
    pub fn saga(&self) -> &Saga<CreateOrderInput, Order, M::Tx, GatewayError> {
        &self.saga
    }

    /// Creates an order for the given amount.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, input: CreateOrderInput) -> Result<Order, OrderError> {
        let saga = &self.saga;
        let result = with_transaction(self.transactions.as_ref(), |mut tx| async move {
            let mut coordinator = saga.coordinator();
            let outcome = match coordinator.execute(&mut tx, input).await {
                Some(order) => Ok(order),
                None => {
                    for failure in coordinator.errors() {
                        tracing::error!(
                            step = failure.step,
                            error = %failure.error,
                            "order creation step failed"
                        );
                    }
                    for failure in coordinator.compensation_errors() {
                        tracing::error!(
                            step = failure.step,
                            error = %failure.error,
                            "order creation compensation failed"
                        );
                    }
                    Err(OrderError::CreationFailed)
                }
            };
            (tx, outcome)
        })
        .await;

        match &result {
            Ok(order) => {
                metrics::counter!("orders_created_total").increment(1);
                tracing::info!(order_id = %order.id, "order created");
            }
            Err(_) => {
                metrics::counter!("orders_failed_total").increment(1);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use common::{DeliveryId, OrderId, PaymentId};

    use super::*;
    use crate::memory::{InMemoryDatabase, InMemoryDeliveries, InMemoryPayments};

    struct Fixture {
        db: InMemoryDatabase,
        payments: InMemoryPayments,
        deliveries: InMemoryDeliveries,
        use_case: CreateOrderUseCase<InMemoryDatabase>,
    }

    fn fixture() -> Fixture {
        let db = InMemoryDatabase::new();
        let payments = InMemoryPayments::new();
        let deliveries = InMemoryDeliveries::new();
        let use_case = CreateOrderUseCase::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            Arc::new(payments.clone()),
            Arc::new(deliveries.clone()),
        );

        Fixture {
            db,
            payments,
            deliveries,
            use_case,
        }
    }

    #[test]
    fn test_saga_shape() {
        let f = fixture();
        assert_eq!(f.use_case.saga().name(), "create_order");
        assert_eq!(
            f.use_case.saga().step_names(),
            vec!["create_order", "create_payment", "create_delivery"]
        );
    }

    #[tokio::test]
    async fn test_create_order_success() {
        let f = fixture();

        let order = f
            .use_case
            .create_order(CreateOrderInput { amount: 1500 })
            .await
            .unwrap();

        assert_eq!(
            order,
            Order {
                id: OrderId::new(1),
                amount: 1500,
                payment_id: Some(PaymentId::new(1)),
                delivery_id: Some(DeliveryId::new(1)),
            }
        );
        assert_eq!(f.db.orders(), vec![order]);
        assert_eq!(f.db.commit_count(), 1);
        assert_eq!(f.deliveries.delivery_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_and_negative_amounts_run_the_saga() {
        let f = fixture();

        for amount in [0, -5] {
            let order = f
                .use_case
                .create_order(CreateOrderInput { amount })
                .await
                .unwrap();
            assert_eq!(order.amount, amount);
            assert!(order.payment_id.is_some());
            assert!(order.delivery_id.is_some());
        }

        assert_eq!(f.db.order_count(), 2);
        assert_eq!(f.db.commit_count(), 2);
        assert_eq!(f.db.rollback_count(), 0);
        assert_eq!(f.payments.created().len(), 2);
    }

    #[tokio::test]
    async fn test_persistence_failure_touches_no_remote_service() {
        let f = fixture();
        f.db.set_fail_on_insert(true);

        let result = f.use_case.create_order(CreateOrderInput { amount: 10 }).await;

        assert_eq!(result, Err(OrderError::CreationFailed));
        assert!(f.payments.created().is_empty());
        assert_eq!(f.deliveries.delivery_count(), 0);
        assert_eq!(f.db.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_begin_failure_is_a_transaction_error() {
        let f = fixture();
        f.db.set_fail_on_begin(true);

        let result = f.use_case.create_order(CreateOrderInput { amount: 10 }).await;

        assert!(matches!(
            result,
            Err(OrderError::Transaction(crate::TransactionError::Begin(_)))
        ));
        assert!(f.payments.created().is_empty());
    }
}
