//! Payments service entry point.

use std::sync::Arc;

use api::config::{self, Config};
use domain::memory::{InMemoryDatabase, InMemoryPayments};
use domain::{HealthCheck, PaymentGateway, PaymentService};
use persistence::{PgHealth, PgPayments};

#[tokio::main]
async fn main() {
    let config = Config::from_env(config::PAYMENTS_PORT);
    api::telemetry::init(&config);

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let (store, health): (Arc<dyn PaymentGateway>, Arc<dyn HealthCheck>) =
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
                    Arc::new(PgPayments::new(pool.clone())),
                    Arc::new(PgHealth::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, payments are kept in memory");
                (
                    Arc::new(InMemoryPayments::new()),
                    Arc::new(InMemoryDatabase::new()),
                )
            }
        };

    let app = api::create_payments_app(PaymentService::new(store), health, metrics_handle);
    tracing::info!("starting payments service");
    api::serve(&config.addr(), app).await.expect("server error");
}
