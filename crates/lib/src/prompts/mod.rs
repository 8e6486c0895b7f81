//! # Prompt Templates
//!
//! Default prompt templates for the extraction agents. Task templates can be
//! overridden by the server's `config.yml` or `prompt.yml`.

pub mod tasks;

pub use tasks::*;

/// The system prompt sent with every structured-extraction call.
///
/// Placeholders: `{shape_name}`, `{shape}`
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a precise information extraction assistant. Read the user's instructions and the text they provide, then answer with a single JSON object named {shape_name} that matches this shape exactly:
{shape}
Respond with the JSON object only. Do not add explanations, apologies, or markdown formatting."#;
