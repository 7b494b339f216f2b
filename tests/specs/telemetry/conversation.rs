// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversation telemetry never fails the caller.

use crate::prelude::*;
use similar_asserts::assert_eq;
use std::sync::Arc;
use sw_api::test_support::FakeTransport;
use sw_api::{log_conversation_event, ApiClient, ConversationEvent, ConversationWorkspace};
use sw_core::Settings;

fn workspace() -> ConversationWorkspace {
    ConversationWorkspace { ws_key: Some("acme".to_string()), ..Default::default() }
}

/// A successful call returns the parsed response
#[tokio::test]
async fn logs_an_event() {
    let transport = Arc::new(FakeTransport::responding(201, r#"{"id_conversation": 9}"#));
    let settings = Settings { api_url: "https://api.example.com".to_string(), ..Settings::default() };
    let client = ApiClient::with_transport(settings, transport.clone());

    let event = ConversationEvent::new("conv-9", "started");
    let response = log_conversation_event(&client, &event, &workspace()).await.unwrap();
    assert_eq!(response.id_conversation, Some(9));

    let requests = transport.requests();
    assert_eq!(requests[0].url, "https://api.example.com/conversation-event");
    assert_eq!(
        requests[0].body,
        serde_json::json!({
            "event": {"conversation_key": "conv-9", "event_type": "started"},
            "workspace": {"ws_key": "acme"},
        })
    );
}

/// Unreachable API, error statuses and disabled telemetry all yield nothing
#[tokio::test]
async fn failures_are_swallowed() {
    let event = ConversationEvent::new("conv-9", "started");
    let clients = [
        ApiClient::with_transport(Settings::default(), Arc::new(FakeTransport::failing())),
        ApiClient::with_transport(Settings::default(), Arc::new(FakeTransport::responding(503, ""))),
        ApiClient::with_transport(Settings::disabled(), Arc::new(FakeTransport::responding(200, "{}"))),
    ];
    for client in &clients {
        assert!(log_conversation_event(client, &event, &workspace()).await.is_none(), "{client:?}");
    }
}
