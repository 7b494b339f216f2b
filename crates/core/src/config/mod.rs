// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application configuration.
//!
//! One [`AppConfig`] describes a single application: identity, image,
//! command, environment sources, workspace volume policy, ports and the
//! per-platform knobs. Every construction path ends in [`AppConfig::validate`],
//! and unknown fields are rejected while parsing.
//!
//! ```toml
//! name = "api"
//! image_name = "acme/api"
//! image_tag = "2.1.0"
//! open_container_port = true
//! container_port = 8080
//!
//! [env]
//! LOG_LEVEL = "info"
//!
//! [workspace]
//! root = "/home/me/acme"
//! mount = true
//!
//! [k8s]
//! replicas = 2
//! create_service = true
//! ```
//!
//! | option | default | effect |
//! |---|---|---|
//! | `name` | `server` | app name; prefix for every generated resource name |
//! | `enabled` | `true` | copied onto every resource graph |
//! | `image` | unset | full image reference, wins over `image_name`/`image_tag` |
//! | `image_name`, `image_tag` | `shipwright/server`, `1.5.0` | image when `image` is unset |
//! | `entrypoint`, `command` | unset | string or list; Docker ENTRYPOINT / CMD |
//! | `install_requirements`, `requirements_file` | `false`, `requirements.txt` | exported to the container env |
//! | `container_name` | `{name}-container` | primary container name |
//! | `python_path`, `add_python_path` | unset | override / extend `PYTHONPATH` |
//! | `container_labels` | empty | labels on the container (pod template on k8s) |
//! | `env`, `env_file` | empty, unset | inline env / YAML env file |
//! | `secrets`, `secrets_file`, `aws_secrets` | empty, unset, empty | secret env sources |
//! | `open_container_port` | `false` | expose `container_port` |
//! | `container_port`, `container_port_name`, `container_host_port` | `8080`, `http`, `8080` | port settings |
//! | `print_env_on_load` | `false` | exported as `PRINT_ENV_ON_LOAD` |
//! | `[workspace]` | see [`WorkspaceConfig`] | workspace mount policy |
//! | `[docker]` | see [`DockerConfig`] | Docker-only knobs |
//! | `[k8s]` | see [`K8sConfig`] | Kubernetes-only knobs |
//! | `[aws]` | see [`AwsConfig`] | ECS/ELB knobs |
//! | `[lifecycle]` | see [`LifecyclePolicy`] | flags for external lifecycle managers |

mod aws;
mod docker;
mod format;
mod k8s;
mod lifecycle;
mod workspace;

pub use aws::{AwsConfig, EcsCluster, LoadBalancer};
pub use docker::{DockerConfig, DockerRestartPolicy, DockerVolumeBind, HostBinding, UserSpec};
pub use format::Format;
pub use k8s::{
    ImagePullPolicy, K8sConfig, PortSpec, RestartPolicy, ServiceType, TargetPort, VolumeSpec,
};
pub use lifecycle::{LifecyclePolicy, ResourceFlags};
pub use workspace::{GitSyncConfig, WorkspaceConfig, WorkspaceLayout, WorkspaceVolumeType};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating an [`AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("git-sync sidecar requested but workspace.git_sync.repo is not set")]
    MissingGitSyncRepo,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HCL parse error: {0}")]
    Hcl(#[from] hcl::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}

/// A container command or entrypoint: either one shell-style line or an
/// explicit argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    Line(String),
    Args(Vec<String>),
}

impl CommandSpec {
    /// Argument vector with a single line kept intact (Kubernetes `command`/`args`).
    pub fn to_args(&self) -> Vec<String> {
        match self {
            CommandSpec::Line(line) => vec![line.clone()],
            CommandSpec::Args(args) => args.clone(),
        }
    }

    /// Argument vector with a single line split on whitespace (ECS `command`).
    pub fn split_args(&self) -> Vec<String> {
        match self {
            CommandSpec::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            CommandSpec::Args(args) => args.clone(),
        }
    }
}

impl From<&str> for CommandSpec {
    fn from(line: &str) -> Self {
        CommandSpec::Line(line.to_string())
    }
}

impl From<Vec<String>> for CommandSpec {
    fn from(args: Vec<String>) -> Self {
        CommandSpec::Args(args)
    }
}

/// Image reference (`name:tag`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { name: name.into(), tag: tag.into() }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

/// Full description of one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub enabled: bool,

    pub image: Option<ImageRef>,
    pub image_name: String,
    pub image_tag: String,
    pub entrypoint: Option<CommandSpec>,
    pub command: Option<CommandSpec>,
    pub install_requirements: bool,
    /// Relative to the workspace root.
    pub requirements_file: String,

    pub container_name: Option<String>,
    /// Replaces the computed `PYTHONPATH` entirely.
    pub python_path: Option<String>,
    /// Appended to the computed `PYTHONPATH`; ignored when `python_path` is set.
    pub add_python_path: Option<String>,
    pub container_labels: IndexMap<String, String>,

    pub env: IndexMap<String, String>,
    /// YAML mapping of env variables.
    pub env_file: Option<PathBuf>,
    pub secrets: IndexMap<String, String>,
    /// YAML mapping of secret variables.
    pub secrets_file: Option<PathBuf>,
    /// Secret ids resolved through a [`crate::SecretStore`].
    pub aws_secrets: Vec<String>,

    pub open_container_port: bool,
    pub container_port: u16,
    /// Port name, only used on Kubernetes.
    pub container_port_name: String,
    /// Host port, only used on Docker.
    pub container_host_port: u16,

    pub print_env_on_load: bool,

    pub workspace: WorkspaceConfig,
    pub docker: DockerConfig,
    pub k8s: K8sConfig,
    pub aws: AwsConfig,
    pub lifecycle: LifecyclePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "server".to_string(),
            version: "1".to_string(),
            enabled: true,
            image: None,
            image_name: "shipwright/server".to_string(),
            image_tag: "1.5.0".to_string(),
            entrypoint: None,
            command: None,
            install_requirements: false,
            requirements_file: "requirements.txt".to_string(),
            container_name: None,
            python_path: None,
            add_python_path: None,
            container_labels: IndexMap::new(),
            env: IndexMap::new(),
            env_file: None,
            secrets: IndexMap::new(),
            secrets_file: None,
            aws_secrets: Vec::new(),
            open_container_port: false,
            container_port: 8080,
            container_port_name: "http".to_string(),
            container_host_port: 8080,
            print_env_on_load: false,
            workspace: WorkspaceConfig::default(),
            docker: DockerConfig::default(),
            k8s: K8sConfig::default(),
            aws: AwsConfig::default(),
            lifecycle: LifecyclePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    crate::setters! {
        into {
            name: String,
            image_name: String,
            image_tag: String,
            requirements_file: String,
            container_port_name: String,
        }
        set {
            enabled: bool,
            install_requirements: bool,
            open_container_port: bool,
            container_port: u16,
            container_host_port: u16,
            print_env_on_load: bool,
            container_labels: IndexMap<String, String>,
            env: IndexMap<String, String>,
            secrets: IndexMap<String, String>,
            aws_secrets: Vec<String>,
            workspace: WorkspaceConfig,
            docker: DockerConfig,
            k8s: K8sConfig,
            aws: AwsConfig,
            lifecycle: LifecyclePolicy,
        }
        option {
            image: ImageRef,
            entrypoint: CommandSpec,
            command: CommandSpec,
            container_name: String,
            python_path: String,
            add_python_path: String,
            env_file: PathBuf,
            secrets_file: PathBuf,
        }
    }

    /// Parse and validate a config document.
    pub fn parse(content: &str, format: Format) -> Result<Self, ConfigError> {
        let config: AppConfig = format.parse(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::parse(&content, format)?;
        tracing::debug!(app = %config.name, path = %path.display(), "loaded app config");
        Ok(config)
    }

    /// Validate the config, consuming and returning it on success.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Check every option that can be checked without a build context.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::invalid("name", "must not be empty"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid("name", "must not contain whitespace"));
        }
        if self.image.is_none() && self.image_name.is_empty() {
            return Err(ConfigError::invalid("image_name", "must not be empty"));
        }
        if let Some(image) = &self.image {
            if image.name.is_empty() || image.tag.is_empty() {
                return Err(ConfigError::invalid("image", "name and tag must not be empty"));
            }
        }
        if self.open_container_port && self.container_port == 0 {
            return Err(ConfigError::invalid("container_port", "must be non-zero"));
        }
        if self.container_port_name.is_empty() {
            return Err(ConfigError::invalid("container_port_name", "must not be empty"));
        }
        self.workspace.validate()?;
        self.k8s.validate()?;
        self.aws.validate()?;
        Ok(())
    }

    /// Image reference: explicit `image` wins over `image_name`/`image_tag`.
    pub fn image_ref(&self) -> ImageRef {
        match &self.image {
            Some(image) => image.clone(),
            None => ImageRef::new(&self.image_name, &self.image_tag),
        }
    }

    /// `name:tag` of [`AppConfig::image_ref`].
    pub fn image_str(&self) -> String {
        self.image_ref().to_string()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
