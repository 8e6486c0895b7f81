//! # Agents
//!
//! The two request-level entry points: blog title suggestion and meeting
//! summarization. Each agent owns a pre-built pipeline; every call runs that
//! pipeline exactly once against a shared `StructuredExtractor`.

pub mod blog_titles;
pub mod meeting_summary;

pub use blog_titles::blog_title_pipeline;
pub use meeting_summary::meeting_summary_pipeline;

use crate::{
    errors::PipelineError,
    extraction::StructuredExtractor,
    pipeline::Pipeline,
    prompts::{ACTION_ITEMS_TASK, BLOG_TITLES_TASK, DEFAULT_TASK_PROMPTS, KEY_POINTS_TASK},
    providers::ai::AiProvider,
    types::{BlogRequest, BlogTitles, MeetingSummary, SummaryRequest},
};
use std::collections::HashMap;
use tracing::info;

/// Both agents, wired to one AI provider.
#[derive(Debug)]
pub struct Agents {
    extractor: StructuredExtractor,
    blog_titles: Pipeline<BlogTitles>,
    meeting_summary: Pipeline<MeetingSummary>,
}

impl Agents {
    /// Builds the agents with task templates from `templates`, falling back to
    /// the library defaults for any task not present.
    pub fn new(
        provider: Box<dyn AiProvider>,
        templates: &HashMap<String, String>,
    ) -> Result<Self, PipelineError> {
        let template = |task: &str| task_template(templates, task);

        Ok(Self {
            extractor: StructuredExtractor::new(provider),
            blog_titles: blog_title_pipeline(template(BLOG_TITLES_TASK))?,
            meeting_summary: meeting_summary_pipeline(
                template(KEY_POINTS_TASK),
                template(ACTION_ITEMS_TASK),
            )?,
        })
    }

    /// Builds the agents with the default prompt templates.
    pub fn with_default_prompts(provider: Box<dyn AiProvider>) -> Result<Self, PipelineError> {
        Self::new(provider, &HashMap::new())
    }

    pub async fn suggest_titles(&self, request: &BlogRequest) -> Result<BlogTitles, PipelineError> {
        info!("[{}] Starting blog title suggestion.", self.blog_titles.name());
        let titles = self
            .blog_titles
            .run_text(&self.extractor, &request.blog_content)
            .await?;
        info!(
            "[{}] Generated {} blog title suggestions.",
            self.blog_titles.name(),
            titles.titles.len()
        );
        Ok(titles)
    }

    pub async fn summarize_meeting(
        &self,
        request: &SummaryRequest,
    ) -> Result<MeetingSummary, PipelineError> {
        info!("[{}] Starting meeting summary.", self.meeting_summary.name());
        let summary = self
            .meeting_summary
            .run_text(&self.extractor, &request.transcript)
            .await?;
        info!(
            "[{}] Meeting summary created with {} key points and {} action items.",
            self.meeting_summary.name(),
            summary.key_points.len(),
            summary.action_items.len()
        );
        Ok(summary)
    }
}

/// The configured template for `task`, or the built-in default.
fn task_template<'a>(templates: &'a HashMap<String, String>, task: &str) -> &'a str {
    templates
        .get(task)
        .map(String::as_str)
        .or_else(|| {
            DEFAULT_TASK_PROMPTS
                .iter()
                .find(|(name, _)| *name == task)
                .map(|(_, prompt)| *prompt)
        })
        .unwrap_or_default()
}
