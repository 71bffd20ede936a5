use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecallError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Memory not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error("Journal not initialized. Run 'recall init' first.")]
    NotInitialized,

    #[error("Journal already initialized at {0}")]
    AlreadyInitialized(String),
}

/// Failures of the outbound assistant call.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,

    #[error("The API key was rejected (invalid key)")]
    InvalidApiKey,

    #[error("The provider is rate limiting requests, try again later")]
    RateLimited,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Another assistant request is already in progress")]
    Busy,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AssistantError {
    /// Whether a local answer should stand in for the remote one.
    pub fn allows_fallback(&self) -> bool {
        matches!(
            self,
            AssistantError::MissingApiKey | AssistantError::Transport(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RecallError>;
