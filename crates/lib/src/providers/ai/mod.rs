pub mod gemini;
pub mod local;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a text-generation backend.
///
/// Implementations are configured with a default model at construction time;
/// callers never pick a model per request.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result is the raw text of the model's reply.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// Builds the shared reqwest client, honoring an optional request timeout.
pub(crate) fn build_http_client(
    timeout_secs: Option<u64>,
) -> Result<reqwest::Client, PromptError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder.build().map_err(PromptError::ReqwestClientBuild)
}
