//! Meeting summarization: key points, then action items, then a pure merge.

use crate::{
    errors::PipelineError,
    extraction::ExtractionSpec,
    pipeline::{Pipeline, PipelineBuilder},
    prompts::{ACTION_ITEMS_TASK, KEY_POINTS_TASK},
    types::{ActionItems, KeyPoints, MeetingSummary},
};

pub const AGENT_NAME: &str = "meeting-summarizer-agent";

/// Builds the summary pipeline. The two extractions do not depend on each
/// other but still run in order: key points first.
pub fn meeting_summary_pipeline(
    key_points_template: &str,
    action_items_template: &str,
) -> Result<Pipeline<MeetingSummary>, PipelineError> {
    let key_points = ExtractionSpec::<KeyPoints>::new(KEY_POINTS_TASK, key_points_template)?;
    let action_items =
        ExtractionSpec::<ActionItems>::new(ACTION_ITEMS_TASK, action_items_template)?;

    Ok(PipelineBuilder::new(AGENT_NAME)
        .step(key_points)
        .step(action_items)
        .aggregate(|mut results| {
            let key_points = results.take::<KeyPoints>(KEY_POINTS_TASK)?;
            let action_items = results.take::<ActionItems>(ACTION_ITEMS_TASK)?;
            Ok(MeetingSummary::compose(key_points, action_items))
        }))
}
