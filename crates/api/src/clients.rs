//! HTTP gateways the orders service uses to reach the payments and
//! deliveries services.

use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, PaymentId};
use domain::{Delivery, DeliveryGateway, GatewayError, Payment, PaymentGateway};
use reqwest::{Client, Response};

use crate::routes::deliveries::CreateDeliveryRequest;
use crate::routes::payments::CreatePaymentRequest;

/// Builds the HTTP client shared by the gateways.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

fn base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Rejects non-2xx responses with the status and body the service sent.
async fn success(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(format!("HTTP {status}: {body}"))
}

/// Payment gateway backed by the payments service.
#[derive(Clone)]
pub struct HttpPaymentGateway {
    client: Client,
    base_url: String,
}

impl HttpPaymentGateway {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base(base_url),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[tracing::instrument(skip(self))]
    async fn create_payment(&self, order_id: OrderId) -> Result<Payment, GatewayError> {
        let response = self
            .client
            .post(format!("{}/payments", self.base_url))
            .json(&CreatePaymentRequest { order_id })
            .send()
            .await
            .map_err(|e| GatewayError::PaymentService(e.to_string()))?;

        success(response)
            .await
            .map_err(GatewayError::PaymentService)?
            .json::<Payment>()
            .await
            .map_err(|e| GatewayError::PaymentService(e.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_payment(&self, payment_id: PaymentId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(format!("{}/payments/{payment_id}", self.base_url))
            .send()
            .await
            .map_err(|e| GatewayError::PaymentService(e.to_string()))?;

        success(response)
            .await
            .map_err(GatewayError::PaymentService)?;
        Ok(())
    }
}

/// Delivery gateway backed by the deliveries service.
#[derive(Clone)]
pub struct HttpDeliveryGateway {
    client: Client,
    base_url: String,
}

impl HttpDeliveryGateway {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base(base_url),
        }
    }
}

#[async_trait]
impl DeliveryGateway for HttpDeliveryGateway {
    #[tracing::instrument(skip(self))]
    async fn create_delivery(&self, order_id: OrderId) -> Result<Delivery, GatewayError> {
        let response = self
            .client
            .post(format!("{}/deliveries", self.base_url))
            .json(&CreateDeliveryRequest { order_id })
            .send()
            .await
            .map_err(|e| GatewayError::DeliveryService(e.to_string()))?;

        success(response)
            .await
            .map_err(GatewayError::DeliveryService)?
            .json::<Delivery>()
            .await
            .map_err(|e| GatewayError::DeliveryService(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let client = http_client(Duration::from_secs(1)).unwrap();
        let gateway = HttpPaymentGateway::new(client, "http://payments:7010/");
        assert_eq!(gateway.base_url, "http://payments:7010");
    }
}
