// ABOUTME: Advice client sending a prompt to the configured text-generation provider
// ABOUTME: Single attempt per call; provider failures come back as provider-kind AppErrors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::config::AdvisorConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};

/// Sends advice prompts to a provider
///
/// Cheap to clone; clones share the provider. Constructed explicitly and
/// passed in, so tests can substitute any [`LlmProvider`].
#[derive(Clone)]
pub struct AdviceClient {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl AdviceClient {
    /// Wrap a provider, sending every prompt to `model`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Use the provider's default model
    #[must_use]
    pub fn with_default_model(provider: Arc<dyn LlmProvider>) -> Self {
        let model = provider.default_model().to_owned();
        Self::new(provider, model)
    }

    /// Build the production client backed by Gemini
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built with the
    /// configured timeout.
    pub fn from_config(config: &AdvisorConfig) -> AppResult<Self> {
        let provider = GeminiProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider), config.model.clone()))
    }

    /// Model every request is sent to
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` and return the raw response text
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank prompt without contacting the
    /// provider. Any provider failure is returned as-is, carrying the
    /// provider's message; an empty completion is an `ExternalServiceError`.
    #[instrument(skip_all, fields(provider = self.provider.name(), model = %self.model))]
    pub async fn request_advice(&self, prompt: &str) -> AppResult<String> {
        if prompt.trim().is_empty() {
            return Err(AppError::invalid_input("advice prompt must not be empty"));
        }

        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]).with_model(&self.model);
        let response = self.provider.complete(&request).await.map_err(|e| {
            warn!(error.code = ?e.code, "Advice request failed: {}", e.message);
            e
        })?;

        if response.content.trim().is_empty() {
            return Err(AppError::external_service(
                self.provider.display_name(),
                "the model returned an empty response",
            ));
        }

        debug!(
            chars = response.content.len(),
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "Advice received"
        );
        Ok(response.content)
    }
}

impl Debug for AdviceClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AdviceClient")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish()
    }
}
