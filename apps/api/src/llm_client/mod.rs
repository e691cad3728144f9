/// LLM Client — the single point of entry for all Gemini API calls in CVLens.
///
/// ARCHITECTURAL RULE: No other module may call the generative-language API
/// directly. All LLM interactions MUST go through this module.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls in CVLens.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
const MIME_JSON: &str = "application/json";
/// Inference is the only long-blocking step in the request pipeline; without
/// a timeout a stuck upstream call would hang the request indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Abstraction over the structured-generation service. Carried in `AppState`
/// as `Arc<dyn InferenceBackend>` so handlers and tests never depend on the
/// concrete Gemini transport.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Free-form text generation (no output schema).
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError>;

    /// JSON generation constrained to the supplied response schema.
    /// Returns the parsed object; callers deserialize into their typed report.
    async fn generate_json(&self, prompt: &str, schema: Value) -> Result<Value, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single Gemini client used by the analysis pipeline.
/// One attempt per request, no retry: every failure is reported once,
/// synchronously, within the originating request/response cycle.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a single call to the generateContent endpoint.
    async fn call(
        &self,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", MIME_JSON)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
        match response.text() {
            Some(text) => Ok(text),
            None => {
                warn!(
                    "LLM returned no text (finish_reason: {:?})",
                    response.finish_reason()
                );
                Err(LlmError::EmptyContent)
            }
        }
    }
}

#[async_trait]
impl InferenceBackend for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, None).await?;
        Self::extract_text(response)
    }

    async fn generate_json(&self, prompt: &str, schema: Value) -> Result<Value, LlmError> {
        let config = GenerationConfig {
            response_mime_type: MIME_JSON,
            response_schema: Some(schema),
        };
        let response = self.call(prompt, Some(config)).await?;
        let text = Self::extract_text(response)?;
        serde_json::from_str(&text).map_err(LlmError::Parse)
    }
}

/// Canned inference backend for tests. Records every prompt it receives and
/// returns a pre-seeded response or failure.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    pub enum FakeResponse {
        Json(Value),
        Text(String),
        Error,
    }

    pub struct FakeBackend {
        pub prompts: Mutex<Vec<String>>,
        response: FakeResponse,
    }

    impl FakeBackend {
        pub fn json(value: Value) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                response: FakeResponse::Json(value),
            }
        }

        pub fn text(text: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                response: FakeResponse::Text(text.to_string()),
            }
        }

        pub fn failing() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                response: FakeResponse::Error,
            }
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }

        fn record(&self, prompt: &str) {
            self.prompts.lock().unwrap().push(prompt.to_string());
        }
    }

    #[async_trait]
    impl InferenceBackend for FakeBackend {
        async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
            self.record(prompt);
            match &self.response {
                FakeResponse::Text(text) => Ok(text.clone()),
                FakeResponse::Json(value) => Ok(value.to_string()),
                FakeResponse::Error => Err(LlmError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
            }
        }

        async fn generate_json(&self, prompt: &str, _schema: Value) -> Result<Value, LlmError> {
            self.record(prompt);
            match &self.response {
                FakeResponse::Json(value) => Ok(value.clone()),
                FakeResponse::Text(text) => serde_json::from_str(text).map_err(LlmError::Parse),
                FakeResponse::Error => Err(LlmError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
            }
        }
    }
}
