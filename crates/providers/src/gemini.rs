//! Google Gemini provider implementation.
//!
//! Talks to the Generative Language REST API directly:
//! `POST {base}/models/{model}:generateContent` with the key in the
//! `x-goog-api-key` header. One prompt in, the first candidate's text out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vynce_core::error::ProviderError;
use vynce_core::provider::{GenerationRequest, ModelDescriptor, ModelProvider};

pub const PROVIDER_NAME: &str = "gemini";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Models offered whenever a credential is configured.
const CATALOGUE: &[(&str, &str)] = &[
    ("gemini-2.5-flash", "Gemini 2.5 Flash"),
    ("gemini-2.5-pro", "Gemini 2.5 Pro"),
    ("gemini-flash-latest", "Gemini Flash Latest"),
];

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider. A missing key is allowed; calls will fail with
    /// `NotConfigured` instead.
    ///
    /// Fails only if the HTTP client itself cannot be built.
    pub fn new(api_key: Option<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client unavailable: {e}")))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
        })
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn to_api_request(request: &GenerationRequest) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }

    /// Concatenate the first candidate's text parts.
    fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(ProviderError::EmptyResponse(format!(
                "prompt blocked: {reason}"
            )));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::EmptyResponse("no candidates in response".into()))?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
            return Err(ProviderError::EmptyResponse(format!(
                "candidate has no text (finish reason: {reason})"
            )));
        }

        Ok(text.to_string())
    }

    /// Pull `error.message` out of a Gemini error body, falling back to the raw body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|b| b.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".into(),
            ));
        };

        let url = self.endpoint(&request.model);
        debug!(provider = PROVIDER_NAME, model = %request.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::to_api_request(&request))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: retry_after(response.headers()),
            });
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(Self::error_message(
                &body,
            )));
        }
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Gemini API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: Self::error_message(&body),
            });
        }

        let api_resp: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::ApiError {
                    status_code: status,
                    message: format!("Failed to parse Gemini response: {e}"),
                })?;

        Self::extract_text(api_resp)
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        if !self.is_configured() {
            return Ok(Vec::new());
        }
        Ok(CATALOGUE
            .iter()
            .map(|(id, name)| ModelDescriptor::new(*id, *name, PROVIDER_NAME))
            .collect())
    }
}

/// Seconds from a `Retry-After` header, when it carries a delay.
fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

// --- Gemini API types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'static str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}
