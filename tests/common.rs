// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, scripted LLM providers and ledger fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `calorie_advisor`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use calorie_advisor::advice::AdviceClient;
use calorie_advisor::config::LogLevel;
use calorie_advisor::errors::{AppError, ErrorCode};
use calorie_advisor::ledger::NutritionLedger;
use calorie_advisor::llm::{ChatRequest, ChatResponse, LlmProvider};
use calorie_advisor::models::MealType;
use tokio::sync::oneshot;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; quiet by default
        let log_level = std::env::var("TEST_LOG")
            .map_or(LogLevel::Warn, |level| LogLevel::from_str_or_default(&level))
            .to_tracing_level();

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Reply a fake provider should produce
pub type ScriptedReply = Result<String, AppError>;

fn prompt_of(request: &ChatRequest) -> String {
    request
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn response(content: String, request: &ChatRequest) -> ChatResponse {
    ChatResponse {
        content,
        model: request.model.clone().unwrap_or_default(),
        usage: None,
        finish_reason: Some("STOP".to_owned()),
    }
}

// ============================================================================
// Static provider: same outcome for every call
// ============================================================================

/// Provider answering every call immediately with the same outcome
pub struct StaticProvider {
    outcome: Result<String, (ErrorCode, String)>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StaticProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_owned()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(code: ErrorCode, message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err((code, message.to_owned())),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    fn display_name(&self) -> &'static str {
        "Static Test Provider"
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["test-model"]
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt_of(request));
        match &self.outcome {
            Ok(text) => Ok(response(text.clone(), request)),
            Err((code, message)) => Err(AppError::new(*code, message.clone())),
        }
    }
}

// ============================================================================
// Gated provider: each call waits for a reply released by the test
// ============================================================================

/// Provider whose calls block until the test releases a reply
///
/// Each gate is selected by a substring of the prompt, so the pairing of
/// calls to replies does not depend on task scheduling.
#[derive(Default)]
pub struct GatedProvider {
    gates: Mutex<Vec<(String, oneshot::Receiver<ScriptedReply>)>>,
    prompts: Mutex<Vec<String>>,
}

impl GatedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a gate for the call whose prompt contains `marker`
    pub fn gate(&self, marker: &str) -> oneshot::Sender<ScriptedReply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push((marker.to_owned(), rx));
        tx
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for GatedProvider {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn display_name(&self) -> &'static str {
        "Gated Test Provider"
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["test-model"]
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let prompt = prompt_of(request);
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            let position = gates
                .iter()
                .position(|(marker, _)| prompt.contains(marker.as_str()))
                .ok_or_else(|| AppError::internal("no gate registered for prompt"))?;
            gates.remove(position).1
        };
        self.prompts.lock().unwrap().push(prompt);

        let reply = gate
            .await
            .map_err(|_| AppError::internal("gate dropped without a reply"))?;
        reply.map(|text| response(text, request))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Client over any provider using its default model
pub fn client_for(provider: Arc<dyn LlmProvider>) -> AdviceClient {
    AdviceClient::with_default_model(provider)
}

/// Ledger with the two-entry day used across scenarios (750 kcal, goal 2000)
pub fn breakfast_and_lunch() -> NutritionLedger {
    let mut ledger = NutritionLedger::new(2000).unwrap();
    ledger.add_entry("Oatmeal", 300, MealType::Breakfast).unwrap();
    ledger.add_entry("Salad", 450, MealType::Lunch).unwrap();
    ledger
}
