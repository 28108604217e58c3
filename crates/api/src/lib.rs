//! HTTP services for the order-creation system.
//!
//! Three services share this crate, each with its own binary:
//! - orders: `POST /orders` runs the order-creation saga
//! - payments: `POST /payments`, `DELETE /payments/{id}`
//! - deliveries: `POST /deliveries`
//!
//! Every service also exposes `GET /health` and `GET /metrics`, with
//! structured logging (tracing) and Prometheus metrics.

pub mod clients;
pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use domain::{DeliveryService, HealthCheck, PaymentService};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::OrderCreator;

/// Creates the orders service router.
pub fn create_orders_app(
    orders: Arc<dyn OrderCreator>,
    health: Arc<dyn HealthCheck>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let app = Router::new()
        .route("/orders", post(routes::orders::create))
        .with_state(orders);

    with_service_routes(app, health, metrics_handle)
}

/// Creates the payments service router.
pub fn create_payments_app(
    payments: PaymentService,
    health: Arc<dyn HealthCheck>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let app = Router::new()
        .route("/payments", post(routes::payments::create))
        .route("/payments/{id}", delete(routes::payments::delete))
        .with_state(payments);

    with_service_routes(app, health, metrics_handle)
}

/// Creates the deliveries service router.
pub fn create_deliveries_app(
    deliveries: DeliveryService,
    health: Arc<dyn HealthCheck>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let app = Router::new()
        .route("/deliveries", post(routes::deliveries::create))
        .with_state(deliveries);

    with_service_routes(app, health, metrics_handle)
}

/// Adds the health and metrics routes, CORS and request tracing.
fn with_service_routes(
    app: Router,
    health: Arc<dyn HealthCheck>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let health_router = Router::new()
        .route("/health", get(routes::health::check))
        .with_state(health);

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    app.merge(health_router)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves `app` until a shutdown signal arrives.
pub async fn serve(addr: &str, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}
