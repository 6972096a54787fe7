use async_trait::async_trait;
use miette::Result;

pub struct ProcessingChain<S1: ProcessingStep, S2: ProcessingStep<Input = S1::Output>>(S1, S2);
pub struct ProcessingParallel<S: ProcessingStep>(S);

#[async_trait]
pub trait ProcessingStep: Send + Sync {
    type Input: Send + Sync;
    type Output: Send + Sync;

    async fn process(&self, input: Self::Input) -> Result<Self::Output>;
}

#[async_trait]
impl<S1: ProcessingStep, S2: ProcessingStep<Input = S1::Output>> ProcessingStep
    for ProcessingChain<S1, S2>
{
    type Input = S1::Input;
    type Output = S2::Output;

    async fn process(&self, input: Self::Input) -> Result<Self::Output> {
        let first = self.0.process(input).await?;
        self.1.process(first).await
    }
}

/// Runs the inner step on every input concurrently and fails on the first error
#[async_trait]
impl<S: ProcessingStep> ProcessingStep for ProcessingParallel<S> {
    type Input = Vec<S::Input>;
    type Output = Vec<S::Output>;

    async fn process(&self, input: Self::Input) -> Result<Self::Output> {
        let results =
            futures::future::join_all(input.into_iter().map(|i| self.0.process(i))).await;

        results.into_iter().collect()
    }
}

pub trait ProcessingStepChain: Sized + ProcessingStep {
    fn chain<S: ProcessingStep<Input = Self::Output>>(self, other: S) -> ProcessingChain<Self, S> {
        ProcessingChain(self, other)
    }
}

impl<S: ProcessingStep> ProcessingStepChain for S {}

pub trait ProcessingStepParallel: Sized + ProcessingStep {
    fn parallel(self) -> ProcessingParallel<Self> {
        ProcessingParallel(self)
    }
}

impl<S: ProcessingStep> ProcessingStepParallel for S {}
