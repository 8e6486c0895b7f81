use thiserror::Error;

/// Errors raised while talking to an AI provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error (status {status}): {body}")]
    AiApi { status: u16, body: String },
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

/// Reasons a single structured-extraction call did not produce a result.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error(transparent)]
    Provider(#[from] PromptError),
    #[error("AI provider returned an empty reply")]
    EmptyReply,
    #[error("reply does not match the `{shape}` shape: {reason}")]
    Malformed { shape: &'static str, reason: String },
}

/// Errors that abort a whole pipeline invocation.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("extraction step '{step}' failed: {source}")]
    ExtractionFailure {
        step: String,
        #[source]
        source: ExtractionError,
    },
    #[error("invalid instruction template for '{name}': {reason}")]
    InvalidTemplate { name: String, reason: String },
    #[error("aggregation failed: {0}")]
    Aggregation(String),
}

impl PipelineError {
    /// A short, stable identifier for the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "invalid_input",
            PipelineError::ExtractionFailure { .. } => "extraction_failure",
            PipelineError::InvalidTemplate { .. } => "invalid_template",
            PipelineError::Aggregation(_) => "aggregation",
        }
    }
}
