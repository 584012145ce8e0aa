// ABOUTME: Google Gemini LLM provider implementation for single-shot text generation
// ABOUTME: Calls the Generative Language generateContent endpoint and maps its failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. The key is sent in the `x-goog-api-key` header, never
//! in the URL, so it cannot leak through transport error messages.
//!
//! ## Supported Models
//!
//! - `gemini-2.5-flash` (default)
//! - `gemini-2.5-pro`
//! - `gemini-2.0-flash`
//! - `gemini-1.5-flash`

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use crate::config::AdvisorConfig;
use crate::constants::defaults;
use crate::errors::{AppError, ErrorCode};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Available Gemini models
const AVAILABLE_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-2.0-flash",
    "gemini-1.5-flash",
];

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Provider label used in error messages
const SERVICE_NAME: &str = "Gemini";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key and the transport defaults
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: defaults::ADVICE_MODEL.to_owned(),
            base_url: API_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from loaded startup configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built with the configured timeout.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AppError> {
        let provider = Self::new(config.api_key.clone()).with_default_model(config.model.clone());
        match config.request_timeout {
            Some(timeout) => provider.with_timeout(timeout),
            None => Ok(provider),
        }
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different API root (local stubs, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Rebuild the HTTP client with a request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, AppError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(self)
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    fn convert_message(message: &ChatMessage) -> GeminiContent {
        GeminiContent {
            role: Some(Self::convert_role(message.role).to_owned()),
            parts: vec![ContentPart {
                text: Some(message.content.clone()),
            }],
        }
    }

    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        GeminiRequest {
            contents: request.messages.iter().map(Self::convert_message).collect(),
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let parts = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|c| &c.parts)
            .ok_or_else(|| AppError::external_service(SERVICE_NAME, "No content in response"))?;

        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                "Response contained no text",
            ));
        }
        Ok(text)
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to the matching error code
    fn map_api_error(status: StatusCode, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.trim().to_owned(), |e| e.message);

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::rate_limited(format!("{message} ({})", Self::retry_hint(&message)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AppError::external_auth(format!("{SERVICE_NAME} rejected the API key: {message}"))
            }
            StatusCode::SERVICE_UNAVAILABLE => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{SERVICE_NAME} is unavailable: {message}"),
            ),
            _ => AppError::external_service(
                SERVICE_NAME,
                format!("API error ({}): {message}", status.as_u16()),
            ),
        }
    }

    /// Short retry hint derived from Gemini's quota text
    ///
    /// Gemini reports e.g. "... Please retry in 6.406453963s."
    fn retry_hint(message: &str) -> String {
        const RETRY_MARKER: &str = "Please retry in ";
        let seconds = message
            .find(RETRY_MARKER)
            .map(|pos| &message[pos + RETRY_MARKER.len()..])
            .and_then(|tail| tail.split_once('s'))
            .and_then(|(value, _)| value.parse::<f64>().ok());

        match seconds {
            Some(seconds) => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let seconds_int = seconds.ceil() as u64;
                format!("quota exceeded, try again in {seconds_int} seconds")
            }
            None => "quota exceeded, wait a moment and try again".to_owned(),
        }
    }

    fn transport_error(e: reqwest::Error, context: &str) -> AppError {
        let e = e.without_url();
        let message = format!("{context}: {e}");
        AppError::from(e).with_message(message)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn available_models(&self) -> &'static [&'static str] {
        AVAILABLE_MODELS
    }

    #[instrument(
        skip_all,
        fields(model = %request.model.as_deref().unwrap_or(self.default_model.as_str()))
    )]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");

        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| Self::transport_error(e, "HTTP request failed"))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(e, "Failed to read response"))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status, &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse response");
                AppError::from(e).with_message("Failed to parse Gemini response")
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(SERVICE_NAME, error.message));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!(finish_reason = ?finish_reason, "Received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
