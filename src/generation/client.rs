use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{config::Config, generation::error::GenerationError};

/// Named bundle of sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingProfile {
    /// Deterministic structured output: flashcards, quizzes, study plans.
    Standard,
    /// Conversational replies.
    Creative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl SamplingProfile {
    pub fn params(&self) -> SamplingParams {
        match self {
            SamplingProfile::Standard => SamplingParams {
                temperature: 0.2,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 8192,
            },
            SamplingProfile::Creative => SamplingParams {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 2048,
            },
        }
    }
}

/// One outbound call per invocation, no retries at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        profile: SamplingProfile,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: SamplingParams,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, model: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            &config.gemini_model,
            &config.gemini_base_url,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        profile: SamplingProfile,
    ) -> Result<String, GenerationError> {
        let api_key = self.api_key.expose_secret().trim();
        if api_key.is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiRequestPart { text: prompt }],
            }],
            generation_config: profile.params(),
        };

        log::debug!(
            "Calling generation API model={} prompt_chars={}",
            self.model,
            prompt.chars().count()
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            return Err(error_for_status(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(format!("Failed to decode response: {}", e)))?;

        let text = parsed.into_text();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(text)
    }
}

/// Maps a non-2xx reply to an attempt error, preferring the provider's own
/// `error.message` over the raw body.
fn error_for_status(status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => GenerationError::InvalidApiKey(message),
        429 => GenerationError::QuotaExceeded(message),
        _ => GenerationError::Api { status, message },
    }
}
