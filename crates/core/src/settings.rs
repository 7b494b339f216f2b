// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:7070";

/// Telemetry switch: on unless `SW_API_ENABLED` is `0`, `false`, `no` or `off`.
pub fn api_enabled() -> bool {
    match std::env::var("SW_API_ENABLED") {
        Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => true,
    }
}

/// Base URL of the telemetry API (`SW_API_URL`), without a trailing slash.
pub fn api_url() -> String {
    std::env::var("SW_API_URL")
        .ok()
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Request timeout for telemetry calls (default 10s, `SW_API_TIMEOUT_MS`).
pub fn api_timeout() -> Duration {
    std::env::var("SW_API_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}

/// Snapshot of the process settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_enabled: bool,
    pub api_url: String,
    pub api_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self { api_enabled: api_enabled(), api_url: api_url(), api_timeout: api_timeout() }
    }

    /// Settings that never send telemetry.
    pub fn disabled() -> Self {
        Self { api_enabled: false, ..Self::default() }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_enabled: true,
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
