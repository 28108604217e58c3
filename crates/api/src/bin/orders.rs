//! Orders service entry point.

use std::sync::Arc;

use api::clients::{HttpDeliveryGateway, HttpPaymentGateway, http_client};
use api::config::{self, Config};
use api::routes::orders::OrderCreator;
use domain::memory::InMemoryDatabase;
use domain::{CreateOrderUseCase, HealthCheck};
use persistence::{PgHealth, PgOrders, PgTransactionManager};

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env(config::ORDERS_PORT);
    api::telemetry::init(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Gateways to the payments and deliveries services
    let client = http_client(config.request_timeout).expect("failed to build HTTP client");
    let payments = Arc::new(HttpPaymentGateway::new(client.clone(), &config.payments_url));
    let deliveries = Arc::new(HttpDeliveryGateway::new(client, &config.deliveries_url));

    // 4. Order storage and the use case
    let (orders, health): (Arc<dyn OrderCreator>, Arc<dyn HealthCheck>) =
        match &config.database_url {
            Some(url) => {
                let pool = persistence::connect(
                    url,
                    config.pool_min_connections,
                    config.pool_max_connections,
                )
                .await
                .expect("failed to connect to database");
                persistence::run_migrations(&pool)
                    .await
                    .expect("failed to run migrations");

                let use_case = CreateOrderUseCase::new(
                    Arc::new(PgTransactionManager::new(pool.clone())),
                    Arc::new(PgOrders::new()),
                    payments,
                    deliveries,
                );
                (Arc::new(use_case), Arc::new(PgHealth::new(pool)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, orders are kept in memory");
                let db = InMemoryDatabase::new();
                let use_case = CreateOrderUseCase::new(
                    Arc::new(db.clone()),
                    Arc::new(db.clone()),
                    payments,
                    deliveries,
                );
                (Arc::new(use_case), Arc::new(db))
            }
        };

    // 5. Build and serve the application
    let app = api::create_orders_app(orders, health, metrics_handle);
    tracing::info!(
        payments_url = %config.payments_url,
        deliveries_url = %config.deliveries_url,
        "starting orders service"
    );
    api::serve(&config.addr(), app).await.expect("server error");
}
