// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flags consumed by the external lifecycle managers that materialize a graph.

use serde::{Deserialize, Serialize};

/// App-wide lifecycle policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecyclePolicy {
    pub skip_create: bool,
    pub skip_read: bool,
    pub skip_update: bool,
    pub recreate_on_update: bool,
    pub skip_delete: bool,
    pub wait_for_creation: bool,
    pub wait_for_update: bool,
    pub wait_for_deletion: bool,
    /// Seconds between waiter polls.
    pub waiter_delay: u32,
    pub waiter_max_attempts: u32,
    /// Skip creation when an active resource with the same name exists.
    pub use_cache: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            skip_create: false,
            skip_read: false,
            skip_update: false,
            recreate_on_update: false,
            skip_delete: false,
            wait_for_creation: true,
            wait_for_update: true,
            wait_for_deletion: true,
            waiter_delay: 30,
            waiter_max_attempts: 50,
            use_cache: true,
        }
    }
}

impl LifecyclePolicy {
    /// Per-resource flags derived from this policy.
    pub fn flags(&self) -> ResourceFlags {
        ResourceFlags {
            skip_create: self.skip_create,
            skip_delete: self.skip_delete,
            wait_for_creation: self.wait_for_creation,
            wait_for_deletion: self.wait_for_deletion,
        }
    }
}

/// Flags carried by every AWS resource descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceFlags {
    pub skip_create: bool,
    pub skip_delete: bool,
    pub wait_for_creation: bool,
    pub wait_for_deletion: bool,
}

impl Default for ResourceFlags {
    fn default() -> Self {
        LifecyclePolicy::default().flags()
    }
}
