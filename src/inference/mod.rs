pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{AnswerFetcher, ProviderError};
pub use providers::GeminiProvider;
pub use types::{CONNECTION_FAILURE_TEXT, FetchOutcome, GenerationConfig, NO_ANSWER_TEXT};
