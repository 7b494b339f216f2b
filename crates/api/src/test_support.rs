// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted transport for telemetry tests.

use crate::{ApiError, ApiResponse, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;

/// A request seen by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: serde_json::Value,
}

/// Replies with a fixed response (or a transport failure) and records
/// every request.
#[derive(Debug)]
pub struct FakeTransport {
    reply: Option<ApiResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self { reply: Some(ApiResponse::new(status, body)), requests: Mutex::new(Vec::new()) }
    }

    /// Every request fails before a response arrives.
    pub fn failing() -> Self {
        Self { reply: None, requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<ApiResponse, ApiError> {
        self.requests.lock().push(RecordedRequest { url: url.to_string(), body: body.clone() });
        self.reply.clone().ok_or_else(|| ApiError::Transport {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}
