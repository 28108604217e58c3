//! Failure records kept by a coordinator.

use thiserror::Error;

/// A forward action failed.
#[derive(Debug, Error)]
#[error("saga step '{step}' (index {index}) failed")]
pub struct StepError<E> {
    /// Name of the failing step.
    pub step: &'static str,
    /// Position of the failing step in the saga.
    pub index: usize,
    /// The error returned by the step.
    #[source]
    pub error: E,
}

/// A compensating action failed.
#[derive(Debug, Error)]
#[error("compensation of step '{step}' (index {index}) failed")]
pub struct CompensationError<E> {
    /// Name of the step whose compensation failed.
    pub step: &'static str,
    /// Position of that step in the saga.
    pub index: usize,
    /// The error returned by the compensation.
    #[source]
    pub error: E,
}
