//! # Structured Extraction
//!
//! One extraction step: substitute the input into an instruction template,
//! ask the AI provider for a JSON object of a known shape, and parse the reply
//! into a typed record. Anything short of a fully populated record is an
//! `ExtractionError`; there are no partial or defaulted results.

use crate::{
    errors::{ExtractionError, PipelineError},
    prompts::EXTRACTION_SYSTEM_PROMPT,
    providers::ai::AiProvider,
    types::RawInput,
};
use serde::de::DeserializeOwned;
use std::{fmt, marker::PhantomData};
use tracing::{debug, info};

/// The single insertion point every instruction template must contain.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// A record type an extraction step can produce.
pub trait ExtractionShape: DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// Name of the shape, used in logs and error messages.
    const NAME: &'static str;

    /// A JSON skeleton of the shape, shown to the model.
    fn descriptor() -> &'static str;

    /// Checks invariants serde cannot express. Returns the reason on failure.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Number of extracted items, for log summaries.
    fn item_count(&self) -> usize;
}

/// An instruction template paired with the shape its reply must take.
pub struct ExtractionSpec<T> {
    name: String,
    template: String,
    shape: PhantomData<fn() -> T>,
}

impl<T: ExtractionShape> ExtractionSpec<T> {
    /// Creates a spec, checking that `template` contains exactly one `{input}`.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        let name = name.into();
        let template = template.into();
        let occurrences = template.matches(INPUT_PLACEHOLDER).count();
        if occurrences != 1 {
            return Err(PipelineError::InvalidTemplate {
                name,
                reason: format!(
                    "expected exactly one '{INPUT_PLACEHOLDER}' placeholder, found {occurrences}"
                ),
            });
        }
        Ok(Self {
            name,
            template,
            shape: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The user prompt for `input`.
    pub fn render(&self, input: &RawInput) -> String {
        self.template.replacen(INPUT_PLACEHOLDER, input.as_str(), 1)
    }

    /// The system prompt describing the expected reply shape.
    pub fn system_prompt(&self) -> String {
        EXTRACTION_SYSTEM_PROMPT
            .replace("{shape_name}", T::NAME)
            .replace("{shape}", T::descriptor())
    }
}

impl<T> Clone for ExtractionSpec<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            template: self.template.clone(),
            shape: PhantomData,
        }
    }
}

impl<T: ExtractionShape> fmt::Debug for ExtractionSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionSpec")
            .field("name", &self.name)
            .field("shape", &T::NAME)
            .finish_non_exhaustive()
    }
}

/// Performs structured-extraction calls against one AI provider.
#[derive(Clone, Debug)]
pub struct StructuredExtractor {
    provider: Box<dyn AiProvider>,
}

impl StructuredExtractor {
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Runs one extraction step. Suspends until the provider replies or fails.
    pub async fn extract<T: ExtractionShape>(
        &self,
        spec: &ExtractionSpec<T>,
        input: &RawInput,
    ) -> Result<T, ExtractionError> {
        let system_prompt = spec.system_prompt();
        let user_prompt = spec.render(input);
        debug!(
            step = spec.name(),
            system_prompt = %system_prompt,
            user_prompt = %user_prompt,
            "--> Sending extraction prompt"
        );

        let reply = self.provider.generate(&system_prompt, &user_prompt).await?;
        debug!(step = spec.name(), "<-- Extraction reply: {}", reply);

        let record = parse_reply::<T>(&reply)?;
        info!(
            step = spec.name(),
            shape = T::NAME,
            items = record.item_count(),
            "Extraction succeeded"
        );
        Ok(record)
    }
}

/// Parses a model reply into `T`, tolerating a surrounding markdown code fence.
pub fn parse_reply<T: ExtractionShape>(reply: &str) -> Result<T, ExtractionError> {
    let json = strip_code_fence(reply);
    if json.is_empty() || json == "null" {
        return Err(ExtractionError::EmptyReply);
    }

    let record: T = serde_json::from_str(json).map_err(|e| ExtractionError::Malformed {
        shape: T::NAME,
        reason: e.to_string(),
    })?;
    record
        .validate()
        .map_err(|reason| ExtractionError::Malformed {
            shape: T::NAME,
            reason,
        })?;
    Ok(record)
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
