use thiserror::Error;

/// Failure of a single chat-completion call.
///
/// The `Display` text is what ends up in front of the user as feedback, so
/// the messages are written for them rather than for a developer.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("No OpenAI API key configured.")]
    MissingApiKey,

    #[error("OpenAI API call failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Request(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that escape the answered-card flow and reach the top-level handler.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("AI worker exited without reporting a result")]
    WorkerDisconnected,
}
