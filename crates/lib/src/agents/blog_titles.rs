//! Blog title suggestion: one extraction step, returned as-is.

use crate::{
    errors::PipelineError,
    extraction::ExtractionSpec,
    pipeline::{Pipeline, PipelineBuilder},
    prompts::BLOG_TITLES_TASK,
    types::BlogTitles,
};

pub const AGENT_NAME: &str = "blog-title-suggestion-agent";

/// Builds the title pipeline around `template`.
pub fn blog_title_pipeline(template: &str) -> Result<Pipeline<BlogTitles>, PipelineError> {
    let spec = ExtractionSpec::<BlogTitles>::new(BLOG_TITLES_TASK, template)?;
    Ok(PipelineBuilder::new(AGENT_NAME)
        .step(spec)
        .aggregate(|mut results| results.take::<BlogTitles>(BLOG_TITLES_TASK)))
}
