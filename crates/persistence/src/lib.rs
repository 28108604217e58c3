//! PostgreSQL adapters for the domain ports.

pub mod deliveries;
pub mod error;
pub mod health;
pub mod orders;
pub mod payments;
pub mod pool;
pub mod tx;

pub use deliveries::PgDeliveries;
pub use error::{PersistenceError, Result};
pub use health::PgHealth;
pub use orders::PgOrders;
pub use payments::PgPayments;
pub use pool::{connect, run_migrations};
pub use tx::{PgTransaction, PgTransactionManager};
