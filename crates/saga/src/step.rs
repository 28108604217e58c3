//! The unit of saga work.

use async_trait::async_trait;

use crate::carrier::{self, Carried};

/// A step in a saga: a forward action and an optional compensating action.
///
/// The forward action receives the value produced by the previous step (or
/// the saga's input, for the first step). The compensating action receives
/// the value this step produced and should undo the step's side effect.
///
/// `Context` is handed to every action of an invocation by mutable
/// reference; it carries per-invocation resources such as an open database
/// transaction. Collaborators a step needs for its whole lifetime are
/// injected into the step value itself.
#[async_trait]
pub trait Step: Send + Sync {
    /// Value received from the previous step.
    type Input: Send + 'static;

    /// Value handed to the next step and kept for compensation.
    type Output: Clone + Send + 'static;

    /// Per-invocation context shared by every step.
    type Context: Send;

    /// Error returned by both actions.
    type Error: Send;

    /// Name used in logs, metrics and error records.
    fn name(&self) -> &'static str;

    /// Performs the step's side effect.
    async fn execute(
        &self,
        ctx: &mut Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error>;

    /// Undoes the step's side effect after a later step failed.
    ///
    /// The default does nothing, which is how a step declares that it has no
    /// compensation.
    async fn compensate(
        &self,
        ctx: &mut Self::Context,
        output: Self::Output,
    ) -> Result<(), Self::Error> {
        let _ = (ctx, output);
        Ok(())
    }
}

/// Object-safe view of a [`Step`] with its input and output erased.
#[async_trait]
pub(crate) trait ErasedStep<Ctx: Send, Err: Send>: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute_erased(&self, ctx: &mut Ctx, input: Carried) -> Result<Carried, Err>;

    async fn compensate_erased(&self, ctx: &mut Ctx, output: Carried) -> Result<(), Err>;
}

pub(crate) struct StepWrapper<S> {
    step: S,
}

impl<S> StepWrapper<S> {
    pub(crate) fn new(step: S) -> Self {
        Self { step }
    }
}

#[async_trait]
impl<S> ErasedStep<S::Context, S::Error> for StepWrapper<S>
where
    S: Step,
{
    fn name(&self) -> &'static str {
        self.step.name()
    }

    async fn execute_erased(
        &self,
        ctx: &mut S::Context,
        input: Carried,
    ) -> Result<Carried, S::Error> {
        let input = carrier::take::<S::Input>(input);
        let output = self.step.execute(ctx, input).await?;
        Ok(carrier::carry(output))
    }

    async fn compensate_erased(&self, ctx: &mut S::Context, output: Carried) -> Result<(), S::Error> {
        let output = carrier::take::<S::Output>(output);
        self.step.compensate(ctx, output).await
    }
}
