// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversation event telemetry.

use crate::{routes, ApiClient, ApiError};
use serde::{Deserialize, Serialize};

/// One event in a conversation. `None` fields are left out of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEvent {
    pub conversation_key: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<serde_json::Value>,
}

impl ConversationEvent {
    pub fn new(conversation_key: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self { conversation_key: conversation_key.into(), event_type: event_type.into(), event_data: None }
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.event_data = Some(data);
        self
    }
}

/// Workspace the conversation belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationWorkspace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_workspace: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationResponse {
    #[serde(default)]
    pub id_conversation: Option<i64>,
    #[serde(default)]
    pub conversation_key: Option<String>,
}

/// Report a conversation event.
///
/// `None` when telemetry is disabled or the call failed for any reason.
pub async fn log_conversation_event(
    client: &ApiClient,
    event: &ConversationEvent,
    workspace: &ConversationWorkspace,
) -> Option<ConversationResponse> {
    if !client.enabled() {
        return None;
    }

    tracing::debug!(conversation_key = %event.conversation_key, event_type = %event.event_type, "logging conversation event");
    match send(client, event, workspace).await {
        Ok(Some(response)) => {
            tracing::debug!(?response, "conversation event logged");
            Some(response)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(error = %e, "could not log conversation event");
            None
        }
    }
}

async fn send(
    client: &ApiClient,
    event: &ConversationEvent,
    workspace: &ConversationWorkspace,
) -> Result<Option<ConversationResponse>, ApiError> {
    let body = serde_json::json!({
        "event": serde_json::to_value(event)?,
        "workspace": serde_json::to_value(workspace)?,
    });
    match client.post(routes::CONVERSATION_EVENT, &body).await? {
        Some(value) if value.is_object() => Ok(Some(serde_json::from_value(value)?)),
        Some(value) => {
            tracing::debug!(%value, "conversation response is not an object");
            Ok(None)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "conversation_tests.rs"]
mod tests;
