//! # Pipeline Executor
//!
//! A pipeline is an ordered list of extraction steps followed by one
//! aggregation function. Steps run strictly one after another against the same
//! input. The first failing step aborts the run: later steps are skipped and
//! the aggregation function is never called.
//!
//! Dropping the future returned by [`Pipeline::run`] cancels the in-flight
//! provider call, and nothing is aggregated.

use crate::{
    errors::{ExtractionError, PipelineError},
    extraction::{ExtractionShape, ExtractionSpec, StructuredExtractor},
    types::RawInput,
};
use async_trait::async_trait;
use std::{any::Any, fmt};
use tracing::{error, info};

/// Type-erased view of an `ExtractionSpec<T>` so specs of different shapes can
/// share one ordered list.
#[async_trait]
trait PipelineStep: Send + Sync {
    fn step_name(&self) -> &str;

    fn shape_name(&self) -> &'static str;

    async fn run(
        &self,
        extractor: &StructuredExtractor,
        input: &RawInput,
    ) -> Result<Box<dyn Any + Send>, ExtractionError>;
}

#[async_trait]
impl<T: ExtractionShape> PipelineStep for ExtractionSpec<T> {
    fn step_name(&self) -> &str {
        self.name()
    }

    fn shape_name(&self) -> &'static str {
        T::NAME
    }

    async fn run(
        &self,
        extractor: &StructuredExtractor,
        input: &RawInput,
    ) -> Result<Box<dyn Any + Send>, ExtractionError> {
        let record = extractor.extract(self, input).await?;
        Ok(Box::new(record))
    }
}

/// The typed records produced by a pipeline's steps, in step order.
pub struct ExtractedResults {
    entries: Vec<(String, Box<dyn Any + Send>)>,
}

impl ExtractedResults {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns the record produced by `step`.
    ///
    /// Fails if no such step ran or it produced a different shape.
    pub fn take<T: ExtractionShape>(&mut self, step: &str) -> Result<T, PipelineError> {
        let index = self
            .entries
            .iter()
            .position(|(name, _)| name == step)
            .ok_or_else(|| PipelineError::Aggregation(format!("no result for step '{step}'")))?;
        let (_, record) = self.entries.remove(index);
        record.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            PipelineError::Aggregation(format!("step '{step}' did not produce {}", T::NAME))
        })
    }
}

impl fmt::Debug for ExtractedResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

type Aggregator<R> = Box<dyn Fn(ExtractedResults) -> Result<R, PipelineError> + Send + Sync>;

/// An ordered list of extraction steps plus the function that merges their
/// results into `R`.
pub struct Pipeline<R> {
    name: String,
    steps: Vec<Box<dyn PipelineStep>>,
    aggregate: Aggregator<R>,
}

/// A builder for creating `Pipeline` instances.
pub struct PipelineBuilder {
    name: String,
    steps: Vec<Box<dyn PipelineStep>>,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step. Steps run in the order they are added.
    pub fn step<T: ExtractionShape>(mut self, spec: ExtractionSpec<T>) -> Self {
        self.steps.push(Box::new(spec));
        self
    }

    /// Finishes the pipeline with its aggregation function.
    pub fn aggregate<R, F>(self, aggregate: F) -> Pipeline<R>
    where
        F: Fn(ExtractedResults) -> Result<R, PipelineError> + Send + Sync + 'static,
    {
        Pipeline {
            name: self.name,
            steps: self.steps,
            aggregate: Box::new(aggregate),
        }
    }
}

impl<R: fmt::Debug> Pipeline<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.step_name()).collect()
    }

    /// Validates `text` and runs the pipeline on it.
    ///
    /// Empty input fails with `InvalidInput` before any provider call.
    pub async fn run_text(
        &self,
        extractor: &StructuredExtractor,
        text: &str,
    ) -> Result<R, PipelineError> {
        let input = RawInput::new(text).inspect_err(|e| {
            error!(pipeline = %self.name, "Rejected input: {e}");
        })?;
        self.run(extractor, &input).await
    }

    /// Runs every step in order, then aggregates.
    pub async fn run(
        &self,
        extractor: &StructuredExtractor,
        input: &RawInput,
    ) -> Result<R, PipelineError> {
        info!(
            pipeline = %self.name,
            steps = self.steps.len(),
            input_len = input.len(),
            "Starting pipeline"
        );

        let mut entries = Vec::with_capacity(self.steps.len());
        for (position, step) in self.steps.iter().enumerate() {
            info!(
                pipeline = %self.name,
                step = step.step_name(),
                shape = step.shape_name(),
                position,
                "Starting extraction step"
            );
            let record = step.run(extractor, input).await.map_err(|source| {
                error!(
                    pipeline = %self.name,
                    step = step.step_name(),
                    "Extraction step failed: {source}"
                );
                PipelineError::ExtractionFailure {
                    step: step.step_name().to_string(),
                    source,
                }
            })?;
            info!(pipeline = %self.name, step = step.step_name(), "Finished extraction step");
            entries.push((step.step_name().to_string(), record));
        }

        let result = (self.aggregate)(ExtractedResults { entries })?;
        info!(pipeline = %self.name, ?result, "Pipeline complete");
        Ok(result)
    }
}

impl<R> fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field(
                "steps",
                &self.steps.iter().map(|s| s.step_name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionItems, KeyPoints};

    fn results() -> ExtractedResults {
        ExtractedResults {
            entries: vec![
                (
                    "key_points".to_string(),
                    Box::new(KeyPoints {
                        points: vec!["p".into()],
                    }),
                ),
                (
                    "action_items".to_string(),
                    Box::new(ActionItems {
                        action_items: vec!["a".into()],
                    }),
                ),
            ],
        }
    }

    #[test]
    fn take_returns_typed_record_by_step_name() {
        let mut results = results();
        let items: ActionItems = results.take("action_items").unwrap();
        assert_eq!(items.action_items, vec!["a"]);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn take_rejects_unknown_step_and_wrong_shape() {
        let mut results = results();
        let missing = results.take::<KeyPoints>("titles").unwrap_err();
        assert!(missing.to_string().contains("no result for step 'titles'"));

        let wrong = results.take::<ActionItems>("key_points").unwrap_err();
        assert!(matches!(wrong, PipelineError::Aggregation(_)));
    }

    #[test]
    fn builder_keeps_step_order() {
        let pipeline = PipelineBuilder::new("meeting")
            .step(ExtractionSpec::<KeyPoints>::new("key_points", "{input}").unwrap())
            .step(ExtractionSpec::<ActionItems>::new("action_items", "{input}").unwrap())
            .aggregate(|results| Ok(results.len()));
        assert_eq!(pipeline.name(), "meeting");
        assert_eq!(pipeline.step_names(), vec!["key_points", "action_items"]);
    }
}
