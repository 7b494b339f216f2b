// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-api: best-effort telemetry calls to the Shipwright API.
//!
//! Nothing in this crate fails the caller's workflow: the public logging
//! functions return `Option` and report every failure at debug level.

mod client;
pub mod conversation;
pub mod routes;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::{ApiClient, ApiError, ApiResponse, HttpTransport, Transport};
pub use conversation::{
    log_conversation_event, ConversationEvent, ConversationResponse, ConversationWorkspace,
};
