//! Saga coordinator for executing one saga invocation.

use std::time::Instant;

use crate::carrier::{self, Carried};
use crate::error::{CompensationError, StepError};
use crate::saga::Saga;
use crate::state::SagaState;

/// Drives one invocation of a [`Saga`].
///
/// The coordinator runs the steps forward in declared order, threading each
/// step's output into the next step. On the first forward failure it stops,
/// then compensates every step that already succeeded, newest first. A
/// compensation failure is recorded and the cascade continues.
///
/// A coordinator is created right before [`execute`](Self::execute) and
/// discarded once the caller has read its error lists.
pub struct Coordinator<'s, Input, Output, Ctx: Send, Err: Send> {
    saga: &'s Saga<Input, Output, Ctx, Err>,
    state: SagaState,
    current_step: Option<usize>,
    completed: Vec<Carried>,
    errors: Vec<StepError<Err>>,
    compensation_errors: Vec<CompensationError<Err>>,
}

impl<'s, Input, Output, Ctx, Err> Coordinator<'s, Input, Output, Ctx, Err>
where
    Ctx: Send,
    Err: Send,
{
    /// Creates a coordinator in the `Ready` state.
    pub fn new(saga: &'s Saga<Input, Output, Ctx, Err>) -> Self {
        Self {
            saga,
            state: SagaState::Ready,
            current_step: None,
            completed: Vec::with_capacity(saga.len()),
            errors: Vec::new(),
            compensation_errors: Vec::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SagaState {
        self.state
    }

    /// Returns the index of the step most recently started forward, or `None`
    /// if no step has started yet.
    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    /// Returns true if every forward action succeeded.
    pub fn succeeded(&self) -> bool {
        self.state == SagaState::Completed
    }

    /// Returns the forward failures, in the order they happened.
    pub fn errors(&self) -> &[StepError<Err>] {
        &self.errors
    }

    /// Returns the compensation failures, in the order they happened.
    pub fn compensation_errors(&self) -> &[CompensationError<Err>] {
        &self.compensation_errors
    }
}

impl<'s, Input, Output, Ctx, Err> Coordinator<'s, Input, Output, Ctx, Err>
where
    Input: Clone + Send + 'static,
    Output: 'static,
    Ctx: Send,
    Err: Send,
{
    /// Executes the saga with the given context and initial input.
    ///
    /// Returns the last step's output when every step succeeded, `None`
    /// otherwise. After a failure, [`errors`](Self::errors) holds the forward
    /// failure and [`compensation_errors`](Self::compensation_errors) any
    /// compensation that failed.
    ///
    /// A coordinator runs once; calling `execute` again returns `None` without
    /// invoking any step.
    #[tracing::instrument(skip_all, fields(saga = self.saga.name()))]
    pub async fn execute(&mut self, ctx: &mut Ctx, input: Input) -> Option<Output> {
        if !self.state.can_run() {
            if self.state.is_terminal() {
                tracing::warn!(state = %self.state, "coordinator already executed");
            } else {
                tracing::warn!(state = %self.state, "previous execution was interrupted");
            }
            return None;
        }

        let saga = self.saga;
        let started = Instant::now();
        metrics::counter!("saga_executions_total", "saga" => saga.name()).increment(1);

        let mut carried = carrier::carry(input);
        for (index, step) in saga.steps().iter().enumerate() {
            self.current_step = Some(index);
            self.state = SagaState::Running(index);
            tracing::debug!(step = step.name(), index, "saga step started");

            match step.execute_erased(ctx, carried).await {
                Ok(output) => {
                    self.completed.push(output.clone_box());
                    carried = output;
                }
                Err(error) => {
                    tracing::warn!(step = step.name(), index, "saga step failed");
                    self.errors.push(StepError {
                        step: step.name(),
                        index,
                        error,
                    });
                    self.compensate(ctx).await;

                    metrics::counter!("saga_failed_total", "saga" => saga.name()).increment(1);
                    metrics::histogram!("saga_duration_seconds", "saga" => saga.name())
                        .record(started.elapsed().as_secs_f64());
                    return None;
                }
            }
        }

        self.state = SagaState::Completed;
        let duration = started.elapsed().as_secs_f64();
        metrics::counter!("saga_completed_total", "saga" => saga.name()).increment(1);
        metrics::histogram!("saga_duration_seconds", "saga" => saga.name()).record(duration);
        tracing::debug!(duration, "saga completed");

        Some(carrier::take::<Output>(carried))
    }

    /// Compensates completed steps from the newest to the oldest.
    async fn compensate(&mut self, ctx: &mut Ctx) {
        debug_assert!(self.state.can_compensate());
        let saga = self.saga;

        while let Some(output) = self.completed.pop() {
            let index = self.completed.len();
            let step = &saga.steps()[index];
            self.state = SagaState::Compensating(index);
            metrics::counter!("saga_compensations_total", "saga" => saga.name()).increment(1);

            match step.compensate_erased(ctx, output).await {
                Ok(()) => {
                    tracing::debug!(step = step.name(), index, "saga step compensated");
                }
                Err(error) => {
                    tracing::warn!(step = step.name(), index, "saga compensation failed");
                    metrics::counter!("saga_compensation_failures_total", "saga" => saga.name())
                        .increment(1);
                    self.compensation_errors.push(CompensationError {
                        step: step.name(),
                        index,
                        error,
                    });
                }
            }
        }

        self.state = SagaState::Terminated;
    }
}
