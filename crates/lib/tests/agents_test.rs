//! # Agent Tests
//!
//! End-to-end behavior of the blog title and meeting summary agents with a
//! stubbed AI provider.

use briefly::{
    prompts::{BLOG_TITLES_TASK, KEY_POINTS_TASK},
    ActionItems, Agents, BlogRequest, KeyPoints, MeetingSummary, PipelineError, SummaryRequest,
};
use briefly_test_utils::MockAiProvider;
use std::collections::HashMap;

#[tokio::test]
async fn suggests_titles_from_stub_reply() {
    let mock = MockAiProvider::new();
    mock.add_response("BlogTitles", r#"{"titles": ["5 Tips", "Tire Care 101"]}"#);
    let agents = Agents::with_default_prompts(Box::new(mock.clone())).unwrap();

    let request = BlogRequest {
        blog_content: "A post about rotating tires.".to_string(),
    };
    let titles = agents.suggest_titles(&request).await.unwrap();

    assert_eq!(titles.titles, vec!["5 Tips", "Tire Care 101"]);
    let calls = mock.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.contains("SEO-friendly blog title suggestions"));
    assert!(calls[0].1.ends_with("A post about rotating tires."));
}

#[tokio::test]
async fn zero_titles_is_a_valid_success() {
    let mock = MockAiProvider::new();
    mock.add_response("BlogTitles", r#"{"titles": []}"#);
    let agents = Agents::with_default_prompts(Box::new(mock)).unwrap();

    let titles = agents
        .suggest_titles(&BlogRequest {
            blog_content: "Short.".to_string(),
        })
        .await
        .unwrap();

    assert!(titles.titles.is_empty());
}

#[tokio::test]
async fn summary_is_the_composition_of_both_extractions() {
    let mock = MockAiProvider::new();
    mock.add_response(
        "KeyPoints",
        "```json\n{\"points\": [\"Q3 roadmap agreed\", \"Hiring paused (HR)\"]}\n```",
    );
    mock.add_response(
        "ActionItems",
        r#"{"action_items": ["Dana: update roadmap doc by Monday"]}"#,
    );
    let agents = Agents::with_default_prompts(Box::new(mock.clone())).unwrap();

    let summary = agents
        .summarize_meeting(&SummaryRequest {
            transcript: "Dana: let's agree on the Q3 roadmap...".to_string(),
        })
        .await
        .unwrap();

    let expected = MeetingSummary::compose(
        KeyPoints {
            points: vec!["Q3 roadmap agreed".into(), "Hiring paused (HR)".into()],
        },
        ActionItems {
            action_items: vec!["Dana: update roadmap doc by Monday".into()],
        },
    );
    assert_eq!(summary, expected);
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn empty_transcript_makes_no_backend_calls() {
    let mock = MockAiProvider::new();
    let agents = Agents::with_default_prompts(Box::new(mock.clone())).unwrap();

    let err = agents
        .summarize_meeting(&SummaryRequest {
            transcript: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::InvalidInput(_)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn key_points_backend_error_never_reaches_action_items() {
    let mock = MockAiProvider::new();
    mock.add_failure("KeyPoints", 500, "internal error");
    mock.add_response("ActionItems", r#"{"action_items": []}"#);
    let agents = Agents::with_default_prompts(Box::new(mock.clone())).unwrap();

    let err = agents
        .summarize_meeting(&SummaryRequest {
            transcript: "Some meeting.".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::ExtractionFailure { ref step, .. } if step == KEY_POINTS_TASK
    ));
    assert_eq!(mock.calls_matching("ActionItems"), 0);
}

#[tokio::test]
async fn configured_templates_override_defaults() {
    let mock = MockAiProvider::new();
    mock.add_response("BlogTitles", r#"{"titles": ["Custom"]}"#);
    let templates = HashMap::from([(
        BLOG_TITLES_TASK.to_string(),
        "Give me titles for: {input}".to_string(),
    )]);
    let agents = Agents::new(Box::new(mock.clone()), &templates).unwrap();

    agents
        .suggest_titles(&BlogRequest {
            blog_content: "rust".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(mock.get_calls()[0].1, "Give me titles for: rust");
}

#[test]
fn template_without_placeholder_is_rejected_at_construction() {
    let templates = HashMap::from([(KEY_POINTS_TASK.to_string(), "no slot here".to_string())]);
    let err = Agents::new(Box::new(MockAiProvider::new()), &templates).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::InvalidTemplate { ref name, .. } if name == KEY_POINTS_TASK
    ));
}
