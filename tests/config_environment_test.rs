// ABOUTME: Integration tests for environment-based configuration loading
// ABOUTME: Validates required credential handling, defaults, overrides and typed enum parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use calorie_advisor::config::{AdviceLanguage, AdvisorConfig, Environment, LogLevel};
use calorie_advisor::errors::ErrorCode;
use serial_test::serial;

const VARS: [&str; 6] = [
    "GEMINI_API_KEY",
    "CALORIE_ADVISOR_MODEL",
    "CALORIE_ADVISOR_LANGUAGE",
    "CALORIE_ADVISOR_DAILY_GOAL",
    "CALORIE_ADVISOR_TIMEOUT_SECS",
    "ENVIRONMENT",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

// =============================================================================
// Typed enums
// =============================================================================

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
    assert_eq!(LogLevel::from_str_or_default("trace"), LogLevel::Debug);
    assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
    assert_eq!(LogLevel::Debug.to_string(), "debug");
}

#[test]
fn test_environment_parsing() {
    assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
    assert_eq!(Environment::from_str_or_default("test"), Environment::Development);
    assert_eq!(Environment::from_str_or_default("anything"), Environment::Development);
    assert!(Environment::Production.is_production());
}

#[test]
fn test_language_parsing() {
    assert_eq!(AdviceLanguage::from_str_or_default("es"), AdviceLanguage::Spanish);
    assert_eq!(AdviceLanguage::from_str_or_default("Español"), AdviceLanguage::Spanish);
    assert_eq!(AdviceLanguage::from_str_or_default("fr"), AdviceLanguage::English);
    assert_eq!(AdviceLanguage::Spanish.to_string(), "es");
}

// =============================================================================
// Loading from the process environment
// =============================================================================

#[test]
#[serial]
fn test_missing_credential_is_fatal_configuration_error() {
    clear_vars();
    let err = AdvisorConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.is_configuration());
    assert!(err.message.contains("GEMINI_API_KEY"));
}

#[test]
#[serial]
fn test_defaults_with_only_credential() {
    clear_vars();
    env::set_var("GEMINI_API_KEY", "test-key");

    let config = AdvisorConfig::from_env().unwrap();
    assert_eq!(config.api_key, "test-key");
    assert_eq!(config.model, "gemini-2.5-flash");
    assert_eq!(config.language, AdviceLanguage::English);
    assert_eq!(config.daily_goal, 2000);
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.environment, Environment::Development);

    clear_vars();
}

#[test]
#[serial]
fn test_all_variables_applied() {
    clear_vars();
    env::set_var("GEMINI_API_KEY", "test-key");
    env::set_var("CALORIE_ADVISOR_MODEL", "gemini-2.5-pro");
    env::set_var("CALORIE_ADVISOR_LANGUAGE", "es");
    env::set_var("CALORIE_ADVISOR_DAILY_GOAL", "1800");
    env::set_var("CALORIE_ADVISOR_TIMEOUT_SECS", "30");
    env::set_var("ENVIRONMENT", "production");

    let config = AdvisorConfig::from_env().unwrap();
    assert_eq!(config.model, "gemini-2.5-pro");
    assert_eq!(config.language, AdviceLanguage::Spanish);
    assert_eq!(config.daily_goal, 1800);
    assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    assert!(config.environment.is_production());

    clear_vars();
}

#[test]
#[serial]
fn test_invalid_goal_and_timeout_are_rejected() {
    clear_vars();
    env::set_var("GEMINI_API_KEY", "test-key");

    env::set_var("CALORIE_ADVISOR_DAILY_GOAL", "0");
    assert_eq!(
        AdvisorConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );

    env::set_var("CALORIE_ADVISOR_DAILY_GOAL", "2000");
    env::set_var("CALORIE_ADVISOR_TIMEOUT_SECS", "soon");
    assert_eq!(
        AdvisorConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );

    clear_vars();
}

#[test]
#[serial]
fn test_overrides_after_loading() {
    clear_vars();
    env::set_var("GEMINI_API_KEY", "test-key");

    let config = AdvisorConfig::from_env()
        .unwrap()
        .with_model("gemini-2.0-flash")
        .with_language(AdviceLanguage::Spanish)
        .with_daily_goal(1500);
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.language, AdviceLanguage::Spanish);
    assert_eq!(config.daily_goal, 1500);
    assert!(!format!("{config:?}").contains("test-key"));

    clear_vars();
}
