// ABOUTME: Application-wide constants for defaults and environment variable names
// ABOUTME: Single source for configuration keys shared by the library and the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default values used when the environment does not override them
pub mod defaults {
    /// Daily calorie goal a fresh session starts with
    pub const DAILY_GOAL_KCAL: u32 = 2000;

    /// Generative model used for advice requests
    pub const ADVICE_MODEL: &str = "gemini-2.5-flash";
}

/// Environment variable names read at startup
pub mod env_vars {
    /// Access key for the generative-text provider (required)
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

    /// Model identifier override
    pub const ADVICE_MODEL: &str = "CALORIE_ADVISOR_MODEL";

    /// Prompt and message language (`en`, `es`)
    pub const ADVICE_LANGUAGE: &str = "CALORIE_ADVISOR_LANGUAGE";

    /// Initial daily goal in kcal
    pub const DAILY_GOAL: &str = "CALORIE_ADVISOR_DAILY_GOAL";

    /// Optional request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "CALORIE_ADVISOR_TIMEOUT_SECS";

    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Service name reported at startup
    pub const CALORIE_ADVISOR: &str = "calorie-advisor";
}
