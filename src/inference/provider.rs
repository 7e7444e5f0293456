use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while talking to the model endpoint.
///
/// These never reach the conversation as-is: the fetcher folds them into
/// one of the fixed fallback strings.
#[derive(Debug)]
pub enum ProviderError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Turns a prompt into the text that ends up in the assistant's bubble.
///
/// Implementations are expected to absorb their own failures and return a
/// fallback string. An `Err` is treated by the caller as an unexpected
/// failure and rendered with a generic error message.
#[async_trait]
pub trait AnswerFetcher: Send + Sync {
    /// Returns the name of the backend, for logging.
    fn name(&self) -> &str;

    /// Fetches one answer for `prompt`. Exactly one outbound call per invocation.
    async fn fetch_answer(&self, prompt: &str) -> Result<String, ProviderError>;
}
