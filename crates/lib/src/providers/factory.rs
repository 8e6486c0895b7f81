//! # AI Provider Factory
//!
//! Turns a `ProviderConfig` into a ready-to-use provider instance. The server
//! calls this once per configured provider at startup, so the default model of
//! every provider is fixed before the first request arrives.

use crate::{
    errors::PromptError,
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
    types::ProviderConfig,
};
use tracing::info;

/// Creates an AI provider instance from its configuration.
///
/// - `gemini` requires an `api_key`; the URL is derived from `model_name` when
///   `api_url` is not set.
/// - `local` requires an `api_url` and sends `model_name` with every request
///   unless it is blank.
pub fn create_provider(
    name: &str,
    config: &ProviderConfig,
) -> Result<Box<dyn AiProvider>, PromptError> {
    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "gemini" => {
            let api_key = non_empty(config.api_key.as_deref()).ok_or_else(|| {
                PromptError::MissingAiProvider(format!(
                    "api_key is required for gemini provider '{name}'"
                ))
            })?;
            let api_url = non_empty(config.api_url.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| GeminiProvider::endpoint_for(&config.model_name));
            info!(
                provider = name,
                %api_url,
                model = %config.model_name,
                "Configuring Gemini provider"
            );
            Box::new(GeminiProvider::new(
                api_url,
                api_key.to_string(),
                config.timeout_secs,
            )?)
        }
        "local" => {
            let api_url = non_empty(config.api_url.as_deref()).ok_or_else(|| {
                PromptError::MissingAiProvider(format!(
                    "api_url is required for local provider '{name}'"
                ))
            })?;
            info!(
                provider = name,
                %api_url,
                model = %config.model_name,
                "Configuring OpenAI-compatible provider"
            );
            Box::new(LocalAiProvider::new(
                api_url.to_string(),
                non_empty(config.api_key.as_deref()).map(str::to_string),
                non_empty(Some(config.model_name.as_str())).map(str::to_string),
                config.timeout_secs,
            )?)
        }
        other => {
            return Err(PromptError::MissingAiProvider(format!(
                "unsupported provider type '{other}' for provider '{name}'"
            )))
        }
    };

    Ok(provider)
}

// `${VAR}` substitution leaves unset variables as empty strings.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
