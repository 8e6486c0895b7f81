//! # Briefly
//!
//! Typed, LLM-backed extraction pipelines. Each pipeline sends user text to a
//! configurable AI provider one step at a time, parses every reply into a typed
//! record, and merges the records into a final result.
//!
//! Two agents are built on top: blog title suggestion and meeting
//! summarization (key points plus action items).

pub mod agents;
pub mod errors;
pub mod extraction;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod types;

pub use agents::Agents;
pub use errors::{ExtractionError, PipelineError, PromptError};
pub use extraction::{ExtractionShape, ExtractionSpec, StructuredExtractor};
pub use pipeline::{ExtractedResults, Pipeline, PipelineBuilder};
pub use types::{
    ActionItems, BlogRequest, BlogTitles, KeyPoints, MeetingSummary, ProviderConfig, RawInput,
    SummaryRequest,
};
