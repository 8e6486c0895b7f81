//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state holds the configuration and the
//! agents, which own the configured AI provider.

use crate::config::AppConfig;
use briefly::{
    providers::{ai::AiProvider, factory::create_provider},
    Agents,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The title and summary agents.
    pub agents: Arc<Agents>,
}

/// Builds the shared application state from the configuration.
///
/// The provider named by `default_provider` is instantiated once and shared by
/// every extraction step.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let name = config.default_provider.clone();
    let provider_config = config.providers.get(&name).ok_or_else(|| {
        anyhow::anyhow!("default_provider '{name}' is not defined under 'providers'")
    })?;
    let provider = create_provider(&name, provider_config)?;
    info!(
        provider = %name,
        model = %provider_config.model_name,
        "Initialized default AI provider."
    );

    build_app_state_with_provider(config, provider)
}

/// Builds the state around an already constructed provider.
pub fn build_app_state_with_provider(
    config: AppConfig,
    provider: Box<dyn AiProvider>,
) -> anyhow::Result<AppState> {
    let agents = Agents::new(provider, &config.task_templates())?;

    Ok(AppState {
        config: Arc::new(config),
        agents: Arc::new(agents),
    })
}
