//! Deliveries service entry point.

use std::sync::Arc;

use api::config::{self, Config};
use domain::memory::{InMemoryDatabase, InMemoryDeliveries};
use domain::{DeliveryGateway, DeliveryService, HealthCheck};
use persistence::{PgDeliveries, PgHealth};

#[tokio::main]
async fn main() {
    let config = Config::from_env(config::DELIVERIES_PORT);
    api::telemetry::init(&config);

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let (store, health): (Arc<dyn DeliveryGateway>, Arc<dyn HealthCheck>) =
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
                (
                    Arc::new(PgDeliveries::new(pool.clone())),
                    Arc::new(PgHealth::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, deliveries are kept in memory");
                (
                    Arc::new(InMemoryDeliveries::new()),
                    Arc::new(InMemoryDatabase::new()),
                )
            }
        };

    let app = api::create_deliveries_app(DeliveryService::new(store), health, metrics_handle);
    tracing::info!("starting deliveries service");
    api::serve(&config.addr(), app).await.expect("server error");
}
