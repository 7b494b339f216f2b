// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker resource graph: one network and one container run spec.
//!
//! Field names and the port/volume map shapes follow the Docker Engine run
//! options, so a graph can be handed straight to a Docker client:
//!
//! ```text
//! ports:   {"8080": 3333, "53/udp": null, "2222/tcp": ["127.0.0.1", 2222]}
//! volumes: {"/home/dev/acme": {"bind": "/usr/local/server/acme", "mode": "rw"}}
//! ```

use crate::BuildError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sw_core::env::{self, EnvironmentMap, SecretStore};
use sw_core::{
    naming, AppConfig, CommandSpec, ContainerPaths, DockerBuildContext, DockerRestartPolicy,
    DockerVolumeBind, HostBinding, ImageRef, MountPlan, Platform, UserSpec,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerNetwork {
    pub name: String,
}

/// Run spec for one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerContainer {
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<CommandSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandSpec>,
    pub detach: bool,
    pub auto_remove: bool,
    pub remove: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<IndexMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub labels: IndexMap<String, String>,
    pub environment: EnvironmentMap,
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub ports: IndexMap<String, HostBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<DockerRestartPolicy>,
    pub stdin_open: bool,
    pub tty: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSpec>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub volumes: IndexMap<String, DockerVolumeBind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    pub use_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerResourceGraph {
    pub name: String,
    pub enabled: bool,
    pub network: DockerNetwork,
    pub containers: Vec<DockerContainer>,
    /// Images to build before the containers run. Never populated from an
    /// app config; lifecycle managers may add to it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
}

/// Build the Docker graph for `config`.
pub fn build(
    config: &AppConfig,
    ctx: &DockerBuildContext,
    secrets: Option<&dyn SecretStore>,
) -> Result<DockerResourceGraph, BuildError> {
    let paths = ContainerPaths::for_app(config, true)?;
    tracing::debug!(app = %config.name, workspace_root = %paths.workspace_root, "resolved container paths");

    let base = env::base_env(Platform::Docker, &paths, config);
    let environment = env::compose(base, config, secrets)?;

    let mut volumes = config.docker.volumes.clone();
    if let MountPlan::Bind { host_path, container_path, mode } =
        MountPlan::resolve(config, &paths, Platform::Docker)?
    {
        tracing::debug!(app = %config.name, host_path = %host_path, container_path = %container_path, "mounting workspace");
        volumes.insert(host_path, DockerVolumeBind { bind: container_path, mode });
    }

    let container = DockerContainer {
        name: config.container_name.clone().unwrap_or_else(|| naming::container(&config.name)),
        image: config.image_str(),
        entrypoint: config.entrypoint.clone(),
        command: config.command.clone(),
        detach: config.docker.detach,
        auto_remove: config.docker.auto_remove,
        remove: config.docker.remove,
        healthcheck: config.docker.healthcheck.clone(),
        hostname: config.docker.hostname.clone(),
        labels: config.container_labels.clone(),
        environment,
        network: ctx.network.clone(),
        platform: config.docker.platform.clone(),
        ports: port_bindings(config),
        restart_policy: config.docker.restart_policy.clone(),
        stdin_open: config.docker.stdin_open,
        tty: config.docker.tty,
        user: config.docker.user.clone(),
        volumes,
        working_dir: config.docker.working_dir.clone(),
        use_cache: config.lifecycle.use_cache,
    };

    Ok(DockerResourceGraph {
        name: config.name.clone(),
        enabled: config.enabled,
        network: DockerNetwork { name: ctx.network.clone() },
        containers: vec![container],
        images: Vec::new(),
    })
}

/// User port bindings plus `{container_port: container_host_port}` when the
/// container port is open. Existing entries are kept in place.
pub fn port_bindings(config: &AppConfig) -> IndexMap<String, HostBinding> {
    let mut ports = config.docker.ports.clone();
    if config.open_container_port {
        ports.insert(
            config.container_port.to_string(),
            HostBinding::Port(config.container_host_port),
        );
    }
    ports
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
