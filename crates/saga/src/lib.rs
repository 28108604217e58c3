//! Saga pattern implementation.
//!
//! A [`Saga`] is an immutable, ordered template of [`Step`]s. Each step turns
//! the value produced by its predecessor into a new value and may declare a
//! compensating action. A [`Coordinator`] executes one saga invocation: it
//! runs the steps forward and, on the first failure, compensates every step
//! that already succeeded, in reverse order.
//!
//! ```text
//! step 0 ──► step 1 ──► step 2 ──✗
//!              ◄── compensate 1 ◄── compensate 0
//! ```

mod carrier;
pub mod coordinator;
pub mod error;
pub mod saga;
pub mod state;
pub mod step;

pub use coordinator::Coordinator;
pub use error::{CompensationError, StepError};
pub use saga::{Saga, SagaBuilder};
pub use state::SagaState;
pub use step::Step;
