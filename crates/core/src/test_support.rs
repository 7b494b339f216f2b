// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::env::{EnvironmentMap, SecretStore, SecretStoreError};
use crate::{AppConfig, WorkspaceConfig};
use indexmap::IndexMap;

// ── Secret store ────────────────────────────────────────────────────────────

/// In-memory secret store keyed by secret id.
#[derive(Debug, Clone, Default)]
pub struct FakeSecretStore {
    secrets: IndexMap<String, EnvironmentMap>,
    unavailable: bool,
}

impl FakeSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, id: &str, pairs: &[(&str, &str)]) -> Self {
        self.secrets.insert(id.to_string(), env_map(pairs));
        self
    }

    /// Every fetch fails as if the backing service were down.
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }
}

impl SecretStore for FakeSecretStore {
    fn fetch(&self, id: &str) -> Result<EnvironmentMap, SecretStoreError> {
        if self.unavailable {
            return Err(SecretStoreError::Unavailable("fake store is down".to_string()));
        }
        self.secrets.get(id).cloned().ok_or_else(|| SecretStoreError::NotFound(id.to_string()))
    }
}

// ── Config factories ────────────────────────────────────────────────────────

/// Ordered map from literal pairs.
pub fn env_map(pairs: &[(&str, &str)]) -> EnvironmentMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// App with a workspace rooted at `/home/dev/acme` and the workspace mounted.
pub fn app(name: &str) -> AppConfig {
    AppConfig::new(name).workspace(WorkspaceConfig::default().root("/home/dev/acme").mount(true))
}

/// App with a workspace root but no mount.
pub fn unmounted_app(name: &str) -> AppConfig {
    AppConfig::new(name).workspace(WorkspaceConfig::default().root("/home/dev/acme"))
}
