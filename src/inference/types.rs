use serde::{Deserialize, Serialize};

/// Substituted when the call succeeded but carried no answer text.
pub const NO_ANSWER_TEXT: &str = "Cevap veriliyor...";

/// Substituted when the call failed (transport error, non-OK status, bad JSON).
pub const CONNECTION_FAILURE_TEXT: &str = "Şu anda bağlantı kurulamıyor.";

/// Sampling parameters sent with every request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 500,
            top_p: 0.8,
        }
    }
}

/// How a fetch ended, before it is collapsed into display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Answer(String),
    NoAnswerProduced,
    ConnectionFailure,
}

impl FetchOutcome {
    /// The text shown to the user for this outcome.
    pub fn into_text(self) -> String {
        match self {
            FetchOutcome::Answer(text) => text,
            FetchOutcome::NoAnswerProduced => NO_ANSWER_TEXT.to_string(),
            FetchOutcome::ConnectionFailure => CONNECTION_FAILURE_TEXT.to_string(),
        }
    }
}
