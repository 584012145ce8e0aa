// ABOUTME: Advice session controller tracking the request lifecycle idle, loading, ready, failed
// ABOUTME: Tags each request with a monotonic sequence number so only the latest resolution applies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Advice Session
//!
//! A request is split in two halves so the caller keeps ownership of the
//! ledger while the remote call is outstanding:
//!
//! 1. [`AdviceController::begin`] snapshots the ledger into a prompt, moves
//!    the state to `Loading` and hands out an [`AdviceTicket`].
//! 2. [`AdviceTicket::fetch`] performs the remote call (it may run on a
//!    spawned task) and yields an [`AdviceResolution`].
//! 3. [`AdviceController::resolve`] applies the resolution only if its
//!    sequence matches the latest ticket issued; anything older is dropped.
//!
//! The controller is the only place a provider failure becomes a
//! user-visible message.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::client::AdviceClient;
use super::prompt::build_prompt;
use crate::config::AdviceLanguage;
use crate::errors::{AppError, AppResult};
use crate::ledger::NutritionLedger;

/// State of the advice panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "payload", rename_all = "snake_case")]
pub enum AdviceState {
    /// No advice requested yet
    #[default]
    Idle,
    /// A request is in flight; previous payloads are cleared
    Loading,
    /// Advice text received
    Ready(String),
    /// The request failed; humanized message
    Failed(String),
}

impl AdviceState {
    /// Whether a request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Advice text, if ready
    #[must_use]
    pub fn advice(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }

    /// Failure message, if failed
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A dispatched advice request
///
/// Carries the prompt built from the ledger at dispatch time; later ledger
/// edits do not affect it.
#[derive(Debug, Clone)]
pub struct AdviceTicket {
    /// Monotonic sequence number within the controller
    pub sequence: u64,
    /// Correlation id for logs
    pub request_id: Uuid,
    /// Prompt snapshot
    pub prompt: String,
}

/// Outcome of a dispatched request, ready to be applied
#[derive(Debug)]
pub struct AdviceResolution {
    /// Sequence of the ticket this resolves
    pub sequence: u64,
    /// Correlation id of the ticket
    pub request_id: Uuid,
    /// Raw advice text or the provider failure
    pub outcome: AppResult<String>,
}

impl AdviceTicket {
    /// Perform the remote call for this ticket
    #[instrument(skip_all, fields(request_id = %self.request_id, sequence = self.sequence))]
    pub async fn fetch(self, client: &AdviceClient) -> AdviceResolution {
        let outcome = client
            .request_advice(&self.prompt)
            .await
            .map_err(|e| e.with_request_id(self.request_id.to_string()));
        AdviceResolution {
            sequence: self.sequence,
            request_id: self.request_id,
            outcome,
        }
    }
}

/// Owns the single advice state of the application
#[derive(Debug, Clone, Default)]
pub struct AdviceController {
    state: AdviceState,
    latest_sequence: u64,
    panel_expanded: bool,
    language: AdviceLanguage,
}

impl AdviceController {
    /// Create an idle controller
    #[must_use]
    pub fn new(language: AdviceLanguage) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &AdviceState {
        &self.state
    }

    /// Sequence number of the most recently issued ticket (0 before the first)
    #[must_use]
    pub const fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }

    /// Language used for prompts and messages
    #[must_use]
    pub const fn language(&self) -> AdviceLanguage {
        self.language
    }

    /// Whether the rendered advice is expanded
    #[must_use]
    pub const fn is_panel_expanded(&self) -> bool {
        self.panel_expanded
    }

    /// The expand/collapse toggle is offered only while advice is shown
    #[must_use]
    pub fn can_toggle_panel(&self) -> bool {
        self.state.advice().is_some()
    }

    /// Flip panel visibility; returns the new visibility, or `None` if no advice is shown
    pub fn toggle_panel(&mut self) -> Option<bool> {
        if !self.can_toggle_panel() {
            return None;
        }
        self.panel_expanded = !self.panel_expanded;
        Some(self.panel_expanded)
    }

    /// Start a new request, superseding any in flight
    ///
    /// Clears previous advice or error immediately.
    pub fn begin(&mut self, ledger: &NutritionLedger) -> AdviceTicket {
        self.latest_sequence += 1;
        self.state = AdviceState::Loading;

        let prompt = build_prompt(
            ledger.daily_goal(),
            ledger.total_calories(),
            ledger.entries(),
            self.language,
        );
        let ticket = AdviceTicket {
            sequence: self.latest_sequence,
            request_id: Uuid::new_v4(),
            prompt,
        };
        info!(
            request_id = %ticket.request_id,
            sequence = ticket.sequence,
            entries = ledger.len(),
            "Advice requested"
        );
        ticket
    }

    /// Apply a resolution if it belongs to the latest ticket
    ///
    /// Returns `false` when the resolution was stale and discarded.
    pub fn resolve(&mut self, resolution: AdviceResolution) -> bool {
        if resolution.sequence != self.latest_sequence {
            debug!(
                request_id = %resolution.request_id,
                sequence = resolution.sequence,
                latest = self.latest_sequence,
                "Discarding stale advice resolution"
            );
            return false;
        }

        self.state = match resolution.outcome {
            Ok(text) => {
                self.panel_expanded = true;
                AdviceState::Ready(text)
            }
            Err(error) => {
                warn!(
                    request_id = %resolution.request_id,
                    error.code = ?error.code,
                    "Advice request failed"
                );
                AdviceState::Failed(humanize_error(&error, self.language))
            }
        };
        true
    }

    /// Run a complete request in place: begin, fetch, resolve
    pub async fn request_advice(
        &mut self,
        ledger: &NutritionLedger,
        client: &AdviceClient,
    ) -> &AdviceState {
        let ticket = self.begin(ledger);
        let resolution = ticket.fetch(client).await;
        self.resolve(resolution);
        &self.state
    }
}

/// User-visible message for a failed request, keeping the provider's message
#[must_use]
pub fn humanize_error(error: &AppError, language: AdviceLanguage) -> String {
    match language {
        AdviceLanguage::English => format!(
            "There was a problem contacting the AI assistant: {}",
            error.message
        ),
        AdviceLanguage::Spanish => format!(
            "Hubo un problema al contactar al asistente de IA: {}",
            error.message
        ),
    }
}
