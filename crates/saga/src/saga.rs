//! Saga templates and their builder.

use std::marker::PhantomData;

use crate::coordinator::Coordinator;
use crate::step::{ErasedStep, Step, StepWrapper};

/// An immutable, ordered sequence of steps describing one business operation.
///
/// A saga is a template: it holds no execution state and can be shared by
/// any number of concurrent invocations, each driven by its own
/// [`Coordinator`].
pub struct Saga<Input, Output, Ctx: Send, Err: Send> {
    name: &'static str,
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    _types: PhantomData<fn(Input) -> Output>,
}

impl<Input, Output, Ctx, Err> Saga<Input, Output, Ctx, Err>
where
    Ctx: Send,
    Err: Send,
{
    /// Returns the saga name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the saga has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Creates a fresh coordinator for one invocation of this saga.
    pub fn coordinator(&self) -> Coordinator<'_, Input, Output, Ctx, Err> {
        Coordinator::new(self)
    }

    pub(crate) fn steps(&self) -> &[Box<dyn ErasedStep<Ctx, Err>>] {
        &self.steps
    }
}

impl<Input, Output, Ctx, Err> std::fmt::Debug for Saga<Input, Output, Ctx, Err>
where
    Ctx: Send,
    Err: Send,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Saga")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .finish()
    }
}

/// Builds a [`Saga`], checking at compile time that each step accepts the
/// output type of the step before it.
///
/// The builder starts with `Output = Input`, so a saga built without steps
/// returns its input unchanged.
///
/// ```compile_fail
/// use async_trait::async_trait;
/// use saga::{SagaBuilder, Step};
///
/// struct ToText;
///
/// #[async_trait]
/// impl Step for ToText {
///     type Input = i64;
///     type Output = String;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "to_text" }
///     async fn execute(&self, _: &mut (), input: i64) -> Result<String, ()> {
///         Ok(input.to_string())
///     }
/// }
///
/// // ToText expects an i64 but the previous output is a String.
/// let saga = SagaBuilder::<i64, i64, (), ()>::new("broken")
///     .then(ToText)
///     .then(ToText)
///     .build();
/// ```
pub struct SagaBuilder<Input, Output, Ctx: Send, Err: Send> {
    name: &'static str,
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    _types: PhantomData<fn(Input) -> Output>,
}

impl<Input, Ctx, Err> SagaBuilder<Input, Input, Ctx, Err>
where
    Ctx: Send,
    Err: Send,
{
    /// Starts an empty saga with the given name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
            _types: PhantomData,
        }
    }
}

impl<Input, Output, Ctx, Err> SagaBuilder<Input, Output, Ctx, Err>
where
    Ctx: Send,
    Err: Send,
{
    /// Appends a step whose input is the current output.
    #[must_use]
    pub fn then<S>(mut self, step: S) -> SagaBuilder<Input, S::Output, Ctx, Err>
    where
        S: Step<Input = Output, Context = Ctx, Error = Err> + 'static,
    {
        self.steps.push(Box::new(StepWrapper::new(step)));
        SagaBuilder {
            name: self.name,
            steps: self.steps,
            _types: PhantomData,
        }
    }

    /// Freezes the step sequence.
    #[must_use]
    pub fn build(self) -> Saga<Input, Output, Ctx, Err> {
        Saga {
            name: self.name,
            steps: self.steps,
            _types: PhantomData,
        }
    }
}
