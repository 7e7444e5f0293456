//! Gemini `generateContent` provider.
//!
//! One non-streaming POST per prompt. The API key travels as the `key`
//! query parameter. Only `candidates[0].content.parts[0].text` is read
//! from the response; everything else is ignored.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{AnswerFetcher, FetchOutcome, GenerationConfig, ProviderError};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response envelope. Every level may be absent or `null` so that a
/// well-formed but empty response parses and is reported as "no answer",
/// not as a failure.
#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Option<Candidate>>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<Option<CandidatePart>>>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-empty.
    fn first_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()??
            .content?
            .parts?
            .into_iter()
            .next()??
            .text
            .filter(|text| !text.is_empty())
    }
}

fn build_request(prompt: &str, generation_config: GenerationConfig) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config,
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    model: String,
    generation_config: GenerationConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key (sent as the `key` query parameter)
    /// * `base_url` - Optional custom base URL (defaults to Google's v1beta API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            generation_config: GenerationConfig::default(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Sends one request and extracts the answer text.
    ///
    /// `Ok(None)` means the call succeeded but carried no usable text.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
        let request = build_request(prompt, self.generation_config);

        info!(
            "Gemini request: model={}, prompt_len={}, config={:?}",
            self.model,
            prompt.len(),
            self.generation_config
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        debug!("Gemini response body: {} bytes", body.len());

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(parsed.first_text())
    }

    /// Like [`generate`](Self::generate), but classifies the result instead of failing.
    pub async fn fetch_outcome(&self, prompt: &str) -> FetchOutcome {
        match self.generate(prompt).await {
            Ok(Some(text)) => FetchOutcome::Answer(text),
            Ok(None) => {
                info!("Gemini returned no answer text");
                FetchOutcome::NoAnswerProduced
            }
            Err(e) => {
                warn!("Gemini fetch failed: {}", e);
                FetchOutcome::ConnectionFailure
            }
        }
    }

    /// The answer text, or a fixed fallback string. Never fails.
    pub async fn fetch_text(&self, prompt: &str) -> String {
        self.fetch_outcome(prompt).await.into_text()
    }
}

#[async_trait]
impl AnswerFetcher for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn fetch_answer(&self, prompt: &str) -> Result<String, ProviderError> {
        Ok(self.fetch_text(prompt).await)
    }
}
