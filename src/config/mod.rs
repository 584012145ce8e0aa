// ABOUTME: Startup configuration for the calorie advisor loaded from environment variables
// ABOUTME: Reads the provider credential once, plus model, language, goal and timeout settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! The provider credential is read exactly once, at startup. A missing
//! credential is a fatal [`ErrorCode::ConfigMissing`](crate::errors::ErrorCode)
//! error: there is no offline mode to fall back to.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GEMINI_API_KEY` | required |
//! | `CALORIE_ADVISOR_MODEL` | `gemini-2.5-flash` |
//! | `CALORIE_ADVISOR_LANGUAGE` | `en` |
//! | `CALORIE_ADVISOR_DAILY_GOAL` | `2000` |
//! | `CALORIE_ADVISOR_TIMEOUT_SECS` | transport default |

/// Typed configuration enums
pub mod types;

pub use types::{AdviceLanguage, Environment, LogLevel};

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use tracing::{debug, info};

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};

/// Complete startup configuration
#[derive(Clone)]
pub struct AdvisorConfig {
    /// Access key for the generative-text provider
    pub api_key: String,
    /// Model identifier sent with every advice request
    pub model: String,
    /// Prompt and message language
    pub language: AdviceLanguage,
    /// Initial daily calorie goal
    pub daily_goal: u32,
    /// Optional per-request timeout; `None` keeps the transport default
    pub request_timeout: Option<Duration>,
    /// Deployment environment
    pub environment: Environment,
}

impl AdvisorConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is honoured if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `GEMINI_API_KEY` is unset or blank, and
    /// `ConfigInvalid` when the goal or timeout cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {e}");
        }
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            model = %config.model,
            language = %config.language,
            daily_goal = config.daily_goal,
            environment = %config.environment,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same conditions as [`AdvisorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(env_vars::GEMINI_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::config_missing(format!(
                    "{} environment variable not set",
                    env_vars::GEMINI_API_KEY
                ))
            })?;

        let model = lookup(env_vars::ADVICE_MODEL)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| defaults::ADVICE_MODEL.to_owned());

        let language = lookup(env_vars::ADVICE_LANGUAGE)
            .map(|s| AdviceLanguage::from_str_or_default(&s))
            .unwrap_or_default();

        let daily_goal = match lookup(env_vars::DAILY_GOAL) {
            Some(raw) => parse_goal(&raw).ok_or_else(|| {
                AppError::config_invalid(format!(
                    "{} must be a positive integer, got '{raw}'",
                    env_vars::DAILY_GOAL
                ))
            })?,
            None => defaults::DAILY_GOAL_KCAL,
        };

        let request_timeout = match lookup(env_vars::REQUEST_TIMEOUT_SECS) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        let environment = lookup(env_vars::ENVIRONMENT)
            .map(|s| Environment::from_str_or_default(&s))
            .unwrap_or_default();

        Ok(Self {
            api_key,
            model,
            language,
            daily_goal,
            request_timeout,
            environment,
        })
    }

    /// Override the model identifier
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the advice language
    #[must_use]
    pub const fn with_language(mut self, language: AdviceLanguage) -> Self {
        self.language = language;
        self
    }

    /// Override the initial daily goal
    #[must_use]
    pub const fn with_daily_goal(mut self, daily_goal: u32) -> Self {
        self.daily_goal = daily_goal;
        self
    }
}

impl Debug for AdvisorConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("language", &self.language)
            .field("daily_goal", &self.daily_goal)
            .field("request_timeout", &self.request_timeout)
            .field("environment", &self.environment)
            .finish()
    }
}

/// Parse a daily goal typed by the user
///
/// Only strictly positive integers are accepted; anything else (zero,
/// negatives, decimals, text) yields `None` so the caller keeps the previous goal.
#[must_use]
pub fn parse_goal(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|goal| *goal > 0)
}

fn parse_timeout(raw: &str) -> AppResult<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| {
            AppError::config_invalid(format!(
                "{} must be a positive number of seconds, got '{raw}'",
                env_vars::REQUEST_TIMEOUT_SECS
            ))
        })
}
