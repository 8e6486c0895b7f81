//! # Application Configuration
//!
//! This module defines the configuration structure for `briefly-server` and
//! the logic for loading it from a `config.yml` file and environment variables.

use briefly::{prompts::DEFAULT_TASK_PROMPTS, ProviderConfig};
use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The largest request body accepted by the API routes, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// The key of the provider every extraction call goes through.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// A map of named, reusable AI provider configurations.
    pub providers: HashMap<String, ProviderConfig>,
    /// A map of tasks, each carrying the instruction template for one step.
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
}

fn default_port() -> u16 {
    9090
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_provider() -> String {
    "gemini_default".to_string()
}

/// The instruction template for one extraction step.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    /// Must contain exactly one `{input}` placeholder.
    #[serde(default)]
    pub template: Option<String>,
}

impl AppConfig {
    /// Task templates keyed by task name, for building the agents.
    pub fn task_templates(&self) -> HashMap<String, String> {
        self.tasks
            .iter()
            .filter_map(|(name, task)| {
                task.template
                    .as_ref()
                    .map(|template| (name.clone(), template.clone()))
            })
            .collect()
    }
}

/// Constructs a `config::Value` map of the default task templates from the
/// library. This serves as the base layer of configuration.
fn build_default_tasks() -> HashMap<String, ConfigValue> {
    DEFAULT_TASK_PROMPTS
        .iter()
        .map(|(name, template)| {
            let mut table = HashMap::new();
            table.insert("template".to_string(), ConfigValue::from(*template));
            (
                name.to_string(),
                ConfigValue::new(None, ConfigValueKind::Table(table)),
            )
        })
        .collect()
}

// Reads a file and substitutes `${VAR}` references with environment values.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layers, lowest precedence first:
/// 1. Default task templates from the library.
/// 2. `config.yml` (or `config_path_override`), falling back to
///    `config.{AI_PROVIDER}.yml`.
/// 3. Optional `prompt.yml` template overrides.
/// 4. Plain environment variables for top-level keys (`PORT`).
/// 5. `BRIEFLY_`-prefixed variables for nested keys
///    (e.g. `BRIEFLY_PROVIDERS__GEMINI_DEFAULT__MODEL_NAME`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("tasks", build_default_tasks())?;

    // Layer 2: Main Config (with Fallback)
    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if std::path::Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?
        .ok_or_else(|| ConfigError::NotFound(format!("Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists or your AI_PROVIDER is set to load a valid template ('gemini' or 'local').")))?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    // Layer 3: User Prompt Overrides (Optional)
    let user_prompt_path = format!("{base_path}/prompt.yml");
    if let Some(user_prompts_content) = read_and_substitute(&user_prompt_path)? {
        info!("Loading user prompt overrides from '{user_prompt_path}'.");
        builder = builder.add_source(File::from_str(&user_prompts_content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 4: Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 5: Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("BRIEFLY")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    if !config.providers.contains_key(&config.default_provider) {
        return Err(ConfigError::General(format!(
            "default_provider '{}' is not defined under 'providers'",
            config.default_provider
        )));
    }

    Ok(config)
}
