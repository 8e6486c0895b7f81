//! # Default Task Prompts
//!
//! One instruction template per extraction step. Each template carries exactly
//! one `{input}` placeholder where the user's text is inserted.

/// Task key for the blog title suggestion step.
pub const BLOG_TITLES_TASK: &str = "blog_titles";
/// Task key for the meeting key-points step.
pub const KEY_POINTS_TASK: &str = "key_points";
/// Task key for the meeting action-items step.
pub const ACTION_ITEMS_TASK: &str = "action_items";

// --- Blog Title Suggestion ---
pub const BLOG_TITLES_PROMPT: &str = r#"Read the following blog content carefully and generate 5-7 creative, engaging, and SEO-friendly blog title suggestions.
The titles should:
- Be attention-grabbing and compelling
- Accurately reflect the blog content
- Be concise (ideally 6-12 words)
- Include relevant keywords when appropriate
- Appeal to the target audience

Blog Content:
{input}"#;

// --- Meeting Summary ---
pub const KEY_POINTS_PROMPT: &str = r#"Read the following meeting transcript carefully and identify the main discussion points. Summarize them into clear, concise bullet points, highlighting key decisions and topics discussed. For each point, include the name of the responsible person or team if mentioned in the transcript:
{input}"#;

pub const ACTION_ITEMS_PROMPT: &str = r#"Read the following meeting transcript and extract all action items assigned, mentioning responsible persons and deadlines if available:
{input}"#;

/// All default task templates, keyed by task name.
pub const DEFAULT_TASK_PROMPTS: [(&str, &str); 3] = [
    (BLOG_TITLES_TASK, BLOG_TITLES_PROMPT),
    (KEY_POINTS_TASK, KEY_POINTS_PROMPT),
    (ACTION_ITEMS_TASK, ACTION_ITEMS_PROMPT),
];
