//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Sends one schema-constrained request per analysis and parses the generated
//! JSON into an [`InsightResult`]. Nothing is retried; every failure is
//! returned to the caller as an [`InsightError`].

use std::time::Duration;

use presence_core::{InsightGenerator, InsightResult, InsightSettings, ScoreSnapshot, SurveyInput};
use reqwest::{Client, Url};

use crate::error::InsightError;
use crate::prompt::build_prompt;
use crate::types::{
    insight_response_schema, ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, RequestContent, RequestPart,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for Gemini content generation.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the public Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, InsightError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`InsightError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("presence-analyzer/0.1 (insight)")
            .build()?;

        let raw = format!(
            "{}/v1beta/models/{model}:generateContent",
            base_url.trim_end_matches('/')
        );
        let endpoint = Url::parse(&raw).map_err(|e| InsightError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
        })
    }

    /// Builds a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::MissingApiKey`] when no key is configured, or
    /// any error from [`GeminiClient::with_base_url`].
    pub fn from_settings(settings: &InsightSettings) -> Result<Self, InsightError> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or(InsightError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            &settings.model,
            settings.timeout_secs,
            &settings.base_url,
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates insights for one scored survey.
    ///
    /// # Errors
    ///
    /// - [`InsightError::Http`] on network failure.
    /// - [`InsightError::Api`] on a non-2xx status.
    /// - [`InsightError::EmptyResponse`] if no candidate text came back.
    /// - [`InsightError::Deserialize`] if the envelope or the generated JSON
    ///   does not match the expected shape.
    pub async fn analyze(
        &self,
        input: &SurveyInput,
        snapshot: &ScoreSnapshot,
    ) -> Result<InsightResult, InsightError> {
        let prompt = build_prompt(input, snapshot);
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: insight_response_schema(),
            },
        };

        tracing::debug!(model = %self.model, "requesting presence insights");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map_or_else(|_| body.trim().to_string(), |e| e.error.message);
            tracing::warn!(status = status.as_u16(), %message, "Gemini request failed");
            return Err(InsightError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_insight(&body)
    }
}

impl InsightGenerator for GeminiClient {
    type Error = InsightError;

    async fn generate(
        &self,
        input: &SurveyInput,
        snapshot: &ScoreSnapshot,
    ) -> Result<InsightResult, InsightError> {
        self.analyze(input, snapshot).await
    }
}

/// Unwraps the candidate text from a `generateContent` body and parses it
/// as an [`InsightResult`].
fn parse_insight(body: &str) -> Result<InsightResult, InsightError> {
    let envelope: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| InsightError::Deserialize {
            context: "generateContent response".to_string(),
            source: e,
        })?;

    let text = envelope.first_text().ok_or(InsightError::EmptyResponse)?;

    serde_json::from_str(&text).map_err(|e| InsightError::Deserialize {
        context: "generated insight JSON".to_string(),
        source: e,
    })
}
