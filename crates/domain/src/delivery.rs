//! Delivery use case, served by the deliveries service.

use std::sync::Arc;

use common::OrderId;

use crate::entities::Delivery;
use crate::error::GatewayError;
use crate::gateways::DeliveryGateway;

/// Creates deliveries in the deliveries store.
#[derive(Clone)]
pub struct DeliveryService {
    store: Arc<dyn DeliveryGateway>,
}

impl DeliveryService {
    pub fn new(store: Arc<dyn DeliveryGateway>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_delivery(&self, order_id: OrderId) -> Result<Delivery, GatewayError> {
        let delivery = self.store.create_delivery(order_id).await?;
        metrics::counter!("deliveries_created_total").increment(1);
        tracing::info!(delivery_id = %delivery.id, "delivery created");
        Ok(delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDeliveries;

    #[tokio::test]
    async fn test_create_delivery() {
        let store = InMemoryDeliveries::new();
        let service = DeliveryService::new(Arc::new(store.clone()));

        let delivery = service.create_delivery(OrderId::new(4)).await.unwrap();

        assert_eq!(delivery.order_id, OrderId::new(4));
        assert_eq!(store.deliveries(), vec![delivery]);
    }
}
