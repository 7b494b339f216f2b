// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! API routes, relative to the configured base URL.

pub const CONVERSATION_EVENT: &str = "/conversation-event";
