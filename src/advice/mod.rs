// ABOUTME: Advice workflow from ledger snapshot to rendered advice text
// ABOUTME: Prompt builder, provider client, session controller and line renderer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Advice Workflow
//!
//! ```text
//! ledger ──build_prompt──▶ AdviceTicket ──AdviceClient──▶ AdviceResolution
//!                                                              │
//!            render_blocks ◀── AdviceState::Ready ◀── AdviceController::resolve
//! ```

/// Provider client
pub mod client;
/// Prompt construction
pub mod prompt;
/// Response text rendering
pub mod render;
/// Session state machine
pub mod session;

pub use client::AdviceClient;
pub use prompt::{build_prompt, meal_label};
pub use render::{render_blocks, Block};
pub use session::{
    humanize_error, AdviceController, AdviceResolution, AdviceState, AdviceTicket,
};
