//! # Test Utilities
//!
//! A scriptable stand-in for an AI provider, shared by the library and server
//! test suites.

use async_trait::async_trait;
use briefly::{errors::PromptError, providers::ai::AiProvider};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

/// What the mock returns when a prompt matches a key.
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    ApiError { status: u16, body: String },
}

// --- Mock AI Provider ---

/// Replies are matched by a substring of the system or user prompt, in the
/// order they were added. Every call is recorded, matched or not.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<Vec<(String, MockReply)>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for prompts containing `key`.
    ///
    /// Shape names such as `KeyPoints` appear in the system prompt, so they
    /// make convenient keys.
    pub fn add_response(&self, key: &str, response: &str) {
        self.responses
            .lock()
            .unwrap()
            .push((key.to_string(), MockReply::Text(response.to_string())));
    }

    /// Pre-programs a backend failure for prompts containing `key`.
    pub fn add_failure(&self, key: &str, status: u16, body: &str) {
        self.responses.lock().unwrap().push((
            key.to_string(),
            MockReply::ApiError {
                status,
                body: body.to_string(),
            },
        ));
    }

    /// Retrieves the recorded `(system_prompt, user_prompt)` calls.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of recorded calls whose system or user prompt contains `key`.
    pub fn calls_matching(&self, key: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(system, user)| system.contains(key) || user.contains(key))
            .count()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        let matched = responses
            .iter()
            .find(|(key, _)| system_prompt.contains(key) || user_prompt.contains(key))
            .map(|(_, reply)| reply.clone());

        match matched {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::ApiError { status, body }) => Err(PromptError::AiApi { status, body }),
            None => Ok("Default mock response".to_string()),
        }
    }
}
