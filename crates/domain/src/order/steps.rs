//! Steps of the `create_order` saga.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use saga::Step;

use crate::entities::{CreateOrderInput, Order};
use crate::error::GatewayError;
use crate::gateways::{DeliveryGateway, OrderPersistenceGateway, PaymentGateway};

/// Persists the order inside the saga's transaction.
///
/// Has no compensation. The insert is undone only because the use case rolls
/// back the enclosing transaction when the saga fails, so this step must stay
/// first and must only ever run inside that transaction.
pub struct CreateOrderStep<P> {
    orders: Arc<P>,
}

impl<P> CreateOrderStep<P> {
    pub fn new(orders: Arc<P>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl<P> Step for CreateOrderStep<P>
where
    P: OrderPersistenceGateway + 'static,
{
    type Input = CreateOrderInput;
    type Output = Order;
    type Context = P::Tx;
    type Error = GatewayError;

    fn name(&self) -> &'static str {
        "create_order"
    }

    async fn execute(&self, tx: &mut P::Tx, input: CreateOrderInput) -> Result<Order, GatewayError> {
        self.orders.create_order(tx, input.amount).await
    }
}

/// Creates the order's payment; compensated by deleting it.
pub struct CreatePaymentStep<C> {
    payments: Arc<dyn PaymentGateway>,
    _context: PhantomData<fn() -> C>,
}

impl<C> CreatePaymentStep<C> {
    pub fn new(payments: Arc<dyn PaymentGateway>) -> Self {
        Self {
            payments,
            _context: PhantomData,
        }
    }
}

#[async_trait]
impl<C> Step for CreatePaymentStep<C>
where
    C: Send + 'static,
{
    type Input = Order;
    type Output = Order;
    type Context = C;
    type Error = GatewayError;

    fn name(&self) -> &'static str {
        "create_payment"
    }

    async fn execute(&self, _ctx: &mut C, mut order: Order) -> Result<Order, GatewayError> {
        let payment = self.payments.create_payment(order.id).await?;
        order.payment_id = Some(payment.id);
        Ok(order)
    }

    async fn compensate(&self, _ctx: &mut C, order: Order) -> Result<(), GatewayError> {
        match order.payment_id {
            Some(payment_id) => self.payments.delete_payment(payment_id).await,
            None => Ok(()),
        }
    }
}

/// Creates the order's delivery.
///
/// Has no compensation: a delivery that was created is never cancelled.
/// Harmless while this is the last step, since nothing after it can fail.
pub struct CreateDeliveryStep<C> {
    deliveries: Arc<dyn DeliveryGateway>,
    _context: PhantomData<fn() -> C>,
}

impl<C> CreateDeliveryStep<C> {
    pub fn new(deliveries: Arc<dyn DeliveryGateway>) -> Self {
        Self {
            deliveries,
            _context: PhantomData,
        }
    }
}

#[async_trait]
impl<C> Step for CreateDeliveryStep<C>
where
    C: Send + 'static,
{
    type Input = Order;
    type Output = Order;
    type Context = C;
    type Error = GatewayError;

    fn name(&self) -> &'static str {
        "create_delivery"
    }

    async fn execute(&self, _ctx: &mut C, mut order: Order) -> Result<Order, GatewayError> {
        let delivery = self.deliveries.create_delivery(order.id).await?;
        order.delivery_id = Some(delivery.id);
        Ok(order)
    }
}
