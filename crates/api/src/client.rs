// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the Shipwright API.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use sw_core::Settings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not create HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("invalid response from {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// Responses at or above 400 are invalid.
    pub fn is_valid(&self) -> bool {
        self.status < 400
    }
}

/// Sends JSON requests. One call, no retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<ApiResponse, ApiError>;
}

/// [`Transport`] over `reqwest` with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<ApiResponse, ApiError> {
        let transport_error =
            |e: reqwest::Error| ApiError::Transport { url: url.to_string(), reason: e.to_string() };
        let response = self.client.post(url).json(body).send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(ApiResponse { status, body })
    }
}

/// Settings plus a transport.
#[derive(Clone)]
pub struct ApiClient {
    settings: Settings,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client over HTTP using the settings' timeout.
    pub fn new(settings: Settings) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(settings.api_timeout)?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    /// Client configured from the `SW_API_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(Settings::from_env())
    }

    pub fn with_transport(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        Self { settings, transport }
    }

    pub fn enabled(&self) -> bool {
        self.settings.api_enabled
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.settings.api_url.trim_end_matches('/'), route)
    }

    /// POST `body` to `route` and decode the JSON reply.
    ///
    /// Returns `Ok(None)` for a JSON `null` body.
    pub async fn post(
        &self,
        route: &str,
        body: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let url = self.url(route);
        let response = self.transport.post_json(&url, body).await?;
        if !response.is_valid() {
            return Err(ApiError::Status { url, status: response.status });
        }
        match serde_json::from_str(&response.body)? {
            serde_json::Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("settings", &self.settings).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
