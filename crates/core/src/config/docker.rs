// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker-only configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Host side of a port binding.
///
/// Serialized exactly as the Docker engine's run API expects:
///
/// | variant | JSON |
/// |---|---|
/// | `Port(3333)` | `3333` |
/// | `Interface("127.0.0.1", 1111)` | `["127.0.0.1", 1111]` |
/// | `Ports(vec![1234, 4567])` | `[1234, 4567]` |
/// | `Random` | `null` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostBinding {
    Port(u16),
    Interface(String, u16),
    Ports(Vec<u16>),
    Random,
}

impl From<u16> for HostBinding {
    fn from(port: u16) -> Self {
        HostBinding::Port(port)
    }
}

/// One entry of the Docker volumes map: where to mount and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockerVolumeBind {
    pub bind: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "rw".to_string()
}

impl DockerVolumeBind {
    pub fn read_write(bind: impl Into<String>) -> Self {
        Self { bind: bind.into(), mode: default_mode() }
    }

    pub fn read_only(bind: impl Into<String>) -> Self {
        Self { bind: bind.into(), mode: "ro".to_string() }
    }
}

/// Restart policy in the engine's `{"Name": ..., "MaximumRetryCount": ...}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockerRestartPolicy {
    /// `on-failure`, `always` or `unless-stopped`.
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(
        rename = "MaximumRetryCount",
        alias = "maximum_retry_count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub maximum_retry_count: Option<u32>,
}

/// User to run as: a name or a numeric UID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserSpec {
    Uid(u32),
    Name(String),
}

/// Options that only affect the Docker container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DockerConfig {
    /// Run in the background.
    pub detach: bool,
    /// Let the daemon remove the container when its process exits.
    pub auto_remove: bool,
    /// Remove the container when it has finished running.
    pub remove: bool,
    pub user: Option<UserSpec>,
    /// Keep STDIN open even if not attached.
    pub stdin_open: bool,
    pub tty: bool,
    pub healthcheck: Option<IndexMap<String, serde_json::Value>>,
    pub hostname: Option<String>,
    /// `os[/arch[/variant]]`
    pub platform: Option<String>,
    pub working_dir: Option<String>,
    pub restart_policy: Option<DockerRestartPolicy>,
    /// Host path or volume name → mount.
    pub volumes: IndexMap<String, DockerVolumeBind>,
    /// `"port"` or `"port/protocol"` → host binding.
    pub ports: IndexMap<String, HostBinding>,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            detach: true,
            auto_remove: true,
            remove: true,
            user: None,
            stdin_open: true,
            tty: true,
            healthcheck: None,
            hostname: None,
            platform: None,
            working_dir: None,
            restart_policy: None,
            volumes: IndexMap::new(),
            ports: IndexMap::new(),
        }
    }
}

impl DockerConfig {
    crate::setters! {
        set {
            detach: bool,
            auto_remove: bool,
            remove: bool,
            stdin_open: bool,
            tty: bool,
            volumes: IndexMap<String, DockerVolumeBind>,
            ports: IndexMap<String, HostBinding>,
        }
        option {
            user: UserSpec,
            healthcheck: IndexMap<String, serde_json::Value>,
            hostname: String,
            platform: String,
            working_dir: String,
            restart_policy: DockerRestartPolicy,
        }
    }
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
