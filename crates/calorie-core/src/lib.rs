// ABOUTME: Core types and constants for the calorie advisor
// ABOUTME: Foundation crate with error handling, food entry models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Calorie Core
//!
//! Foundation crate providing shared types and constants for the calorie
//! advisor. Nothing here performs I/O; the root crate layers the ledger,
//! advice workflow and provider integrations on top.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `ErrorKind`
//! - **models**: Food entries and the fixed meal categories
//! - **constants**: Defaults and environment variable names

/// Unified error handling system with standard error codes
pub mod errors;

/// Food entry and meal category models
pub mod models;

/// Application constants and configuration defaults
pub mod constants;
