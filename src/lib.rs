// ABOUTME: Main library entry point for the calorie advisor
// ABOUTME: Nutrition ledger, advice workflow and the Gemini text-generation provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Calorie Advisor
//!
//! A single-user calorie tracker. Food entries are logged per meal against a
//! daily goal and held in memory for the session. On demand the day's log is
//! turned into a prompt for a generative-text provider and the reply is
//! parsed into headings, bullets and paragraphs for display.
//!
//! ## Architecture
//!
//! - **Ledger**: food entries and the daily goal, with derived aggregates
//! - **Advice**: prompt builder, provider client, session controller, text renderer
//! - **LLM**: provider trait and the Gemini implementation
//! - **Config / Logging**: environment configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use calorie_advisor::ledger::NutritionLedger;
//! use calorie_advisor::models::MealType;
//! use calorie_advisor::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let mut ledger = NutritionLedger::new(2000)?;
//!     ledger.add_entry("Oatmeal", 300, MealType::Breakfast)?;
//!     println!("{} kcal so far", ledger.total_calories());
//!     Ok(())
//! }
//! ```

pub use calorie_core::{constants, errors, models};

/// Advice workflow: prompt construction, provider call, session state, rendering
pub mod advice;

/// Environment-based configuration
pub mod config;

/// In-memory nutrition ledger
pub mod ledger;

/// Text-generation provider abstraction
pub mod llm;

/// Structured logging setup
pub mod logging;
