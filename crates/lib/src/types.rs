//! # Core Types
//!
//! Request and result records shared by the agents and the HTTP layer, plus
//! the configuration record used to construct AI providers.

use crate::{errors::PipelineError, extraction::ExtractionShape};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Raw input ---

/// User-supplied text fed to a pipeline. Never empty or whitespace-only.
#[derive(Clone, PartialEq, Eq)]
pub struct RawInput(String);

impl RawInput {
    /// Wraps `text`, rejecting empty or whitespace-only input.
    pub fn new(text: impl Into<String>) -> Result<Self, PipelineError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PipelineError::InvalidInput(
                "input text must not be empty".to_string(),
            ));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Transcripts can be long; logs only get the size.
impl fmt::Debug for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawInput")
            .field("len", &self.0.len())
            .finish()
    }
}

// --- Provider configuration ---

/// A reusable configuration for a specific AI provider instance.
#[derive(Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider ("gemini" or "local").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it is derived from the model name.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    /// The default model used for every call made through this provider.
    pub model_name: String,
    /// Per-request HTTP timeout. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// --- Blog title suggestion ---

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    pub blog_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlogTitles {
    pub titles: Vec<String>,
}

impl ExtractionShape for BlogTitles {
    const NAME: &'static str = "BlogTitles";

    fn descriptor() -> &'static str {
        r#"{"titles": ["string"]}"#
    }

    fn validate(&self) -> Result<(), String> {
        reject_blank_entries("titles", &self.titles)
    }

    fn item_count(&self) -> usize {
        self.titles.len()
    }
}

// --- Meeting summary ---

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryRequest {
    pub transcript: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyPoints {
    pub points: Vec<String>,
}

impl ExtractionShape for KeyPoints {
    const NAME: &'static str = "KeyPoints";

    fn descriptor() -> &'static str {
        r#"{"points": ["string"]}"#
    }

    fn validate(&self) -> Result<(), String> {
        reject_blank_entries("points", &self.points)
    }

    fn item_count(&self) -> usize {
        self.points.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionItems {
    #[serde(alias = "actionItems")]
    pub action_items: Vec<String>,
}

impl ExtractionShape for ActionItems {
    const NAME: &'static str = "ActionItems";

    fn descriptor() -> &'static str {
        r#"{"action_items": ["string"]}"#
    }

    fn validate(&self) -> Result<(), String> {
        reject_blank_entries("action_items", &self.action_items)
    }

    fn item_count(&self) -> usize {
        self.action_items.len()
    }
}

/// The aggregated result of the meeting pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub key_points: Vec<String>,
    pub action_items: Vec<String>,
}

impl MeetingSummary {
    /// Copies both extracted lists into the summary, untouched.
    pub fn compose(key_points: KeyPoints, action_items: ActionItems) -> Self {
        Self {
            key_points: key_points.points,
            action_items: action_items.action_items,
        }
    }
}

fn reject_blank_entries(field: &str, items: &[String]) -> Result<(), String> {
    match items.iter().position(|item| item.trim().is_empty()) {
        Some(index) => Err(format!("`{field}[{index}]` is blank")),
        None => Ok(()),
    }
}
