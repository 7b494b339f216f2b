// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container environment composition.
//!
//! Sources are layered lowest to highest; each layer overwrites the keys it
//! defines and keeps the position of keys already present:
//!
//! ```text
//!   1. runtime markers and paths   (base_env)
//!   2. AWS variables               (aws.region, aws.profile, ...)
//!   3. env_file
//!   4. secrets_file, then aws_secrets via the SecretStore
//!   5. inline env, then inline secrets
//! ```
//!
//! Kubernetes keeps plain and secret values apart: [`compose_plain`] feeds
//! the ConfigMap and [`secret_data`] feeds the Secret.

use crate::config::{AppConfig, AwsConfig};
use crate::context::Platform;
use crate::paths::ContainerPaths;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Ordered environment; re-inserting a key updates it in place.
pub type EnvironmentMap = IndexMap<String, String>;

pub const PYTHONPATH: &str = "PYTHONPATH";
pub const RUNTIME: &str = "PHIDATA_RUNTIME";
pub const SCRIPTS_DIR: &str = "PHI_SCRIPTS_DIR";
pub const STORAGE_DIR: &str = "PHI_STORAGE_DIR";
pub const META_DIR: &str = "PHI_META_DIR";
pub const PRODUCTS_DIR: &str = "PHI_PRODUCTS_DIR";
pub const NOTEBOOKS_DIR: &str = "PHI_NOTEBOOKS_DIR";
pub const WORKFLOWS_DIR: &str = "PHI_WORKFLOWS_DIR";
pub const WORKSPACE_ROOT: &str = "PHI_WORKSPACE_ROOT";
pub const WORKSPACES_MOUNT: &str = "PHI_WORKSPACES_MOUNT";
pub const WORKSPACE_CONFIG_DIR: &str = "PHI_WORKSPACE_CONFIG_DIR";
pub const INSTALL_REQUIREMENTS: &str = "INSTALL_REQUIREMENTS";
pub const REQUIREMENTS_FILE_PATH: &str = "REQUIREMENTS_FILE_PATH";
pub const MOUNT_WORKSPACE: &str = "MOUNT_WORKSPACE";
pub const PRINT_ENV_ON_LOAD: &str = "PRINT_ENV_ON_LOAD";

pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const AWS_CONFIG_FILE: &str = "AWS_CONFIG_FILE";
pub const AWS_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{kind} not found: {}", path.display())]
    MissingFile { kind: &'static str, path: PathBuf },
}

#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret {id} is not a flat key/value document: {reason}")]
    Malformed { id: String, reason: String },

    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}

/// Source of secret key/value pairs, e.g. AWS Secrets Manager.
pub trait SecretStore: Send + Sync {
    fn fetch(&self, id: &str) -> Result<EnvironmentMap, SecretStoreError>;
}

/// Python's rendering of a boolean, which the container entrypoints expect.
fn flag(value: bool) -> String {
    let rendered = if value { "True" } else { "False" };
    rendered.to_string()
}

/// Runtime markers and path variables injected into every container.
///
/// `PYTHONPATH` is left out on ECS.
pub fn base_env(runtime: Platform, paths: &ContainerPaths, config: &AppConfig) -> EnvironmentMap {
    let mut env = EnvironmentMap::new();
    if runtime != Platform::Aws {
        let python_path = match (&config.python_path, &config.add_python_path) {
            (Some(path), _) => path.clone(),
            (None, Some(extra)) => format!("{}:{}", paths.workspace_root, extra),
            (None, None) => paths.workspace_root.clone(),
        };
        env.insert(PYTHONPATH.to_string(), python_path);
    }
    let vars = [
        (RUNTIME, runtime.to_string()),
        (SCRIPTS_DIR, paths.scripts_dir.clone()),
        (STORAGE_DIR, paths.storage_dir.clone()),
        (META_DIR, paths.meta_dir.clone()),
        (PRODUCTS_DIR, paths.products_dir.clone()),
        (NOTEBOOKS_DIR, paths.notebooks_dir.clone()),
        (WORKFLOWS_DIR, paths.workflows_dir.clone()),
        (WORKSPACE_ROOT, paths.workspace_root.clone()),
        (WORKSPACES_MOUNT, paths.workspace_parent.clone()),
        (WORKSPACE_CONFIG_DIR, paths.workspace_config_dir.clone()),
        (INSTALL_REQUIREMENTS, flag(config.install_requirements)),
        (REQUIREMENTS_FILE_PATH, paths.requirements_file.clone()),
        (MOUNT_WORKSPACE, flag(config.workspace.mount)),
        (PRINT_ENV_ON_LOAD, flag(config.print_env_on_load)),
    ];
    for (key, value) in vars {
        env.insert(key.to_string(), value);
    }
    env
}

/// AWS variables for whatever is configured.
pub fn aws_env(aws: &AwsConfig) -> EnvironmentMap {
    let mut env = EnvironmentMap::new();
    if let Some(region) = &aws.region {
        env.insert(AWS_REGION.to_string(), region.clone());
        env.insert(AWS_DEFAULT_REGION.to_string(), region.clone());
    }
    let optional = [
        (AWS_PROFILE, &aws.profile),
        (AWS_CONFIG_FILE, &aws.config_file),
        (AWS_SHARED_CREDENTIALS_FILE, &aws.shared_credentials_file),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            env.insert(key.to_string(), value.clone());
        }
    }
    env
}

/// Full environment for a single container (Docker, ECS).
pub fn compose(
    base: EnvironmentMap,
    config: &AppConfig,
    secrets: Option<&dyn SecretStore>,
) -> Result<EnvironmentMap, EnvError> {
    let mut env = base;
    env.extend(aws_env(&config.aws));
    if let Some(path) = &config.env_file {
        env.extend(read_env_file("env_file", path)?);
    }
    if let Some(path) = &config.secrets_file {
        env.extend(read_env_file("secrets_file", path)?);
    }
    env.extend(stored_secrets(config, secrets));
    env.extend(config.env.iter().map(|(k, v)| (k.clone(), v.clone())));
    env.extend(config.secrets.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(env)
}

/// Non-secret part of the environment: base, AWS, `env_file` and inline `env`.
pub fn compose_plain(base: EnvironmentMap, config: &AppConfig) -> Result<EnvironmentMap, EnvError> {
    let mut env = base;
    env.extend(aws_env(&config.aws));
    if let Some(path) = &config.env_file {
        env.extend(read_env_file("env_file", path)?);
    }
    env.extend(config.env.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(env)
}

/// Secret part of the environment: `secrets_file`, the secret store and
/// inline `secrets`.
pub fn secret_data(
    config: &AppConfig,
    secrets: Option<&dyn SecretStore>,
) -> Result<EnvironmentMap, EnvError> {
    let mut data = EnvironmentMap::new();
    if let Some(path) = &config.secrets_file {
        data.extend(read_env_file("secrets_file", path)?);
    }
    data.extend(stored_secrets(config, secrets));
    data.extend(config.secrets.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(data)
}

fn stored_secrets(config: &AppConfig, store: Option<&dyn SecretStore>) -> EnvironmentMap {
    let mut data = EnvironmentMap::new();
    if config.aws_secrets.is_empty() {
        return data;
    }
    let Some(store) = store else {
        tracing::warn!(app = %config.name, count = config.aws_secrets.len(), "aws_secrets configured without a secret store, skipping");
        return data;
    };
    for id in &config.aws_secrets {
        match store.fetch(id) {
            Ok(values) => data.extend(values),
            Err(e) => tracing::warn!(app = %config.name, secret_id = %id, error = %e, "failed to read secret, skipping"),
        }
    }
    data
}

/// Read a YAML (or JSON) mapping of variables.
///
/// A missing file is an error; an unreadable or malformed one is skipped
/// with a warning.
pub fn read_env_file(kind: &'static str, path: &Path) -> Result<EnvironmentMap, EnvError> {
    if !path.exists() {
        return Err(EnvError::MissingFile { kind, path: path.to_path_buf() });
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(kind, path = %path.display(), error = %e, "could not read env file, skipping");
            return Ok(EnvironmentMap::new());
        }
    };
    match parse_env_document(&content) {
        Ok(env) => Ok(env),
        Err(reason) => {
            tracing::warn!(kind, path = %path.display(), error = %reason, "could not parse env file, skipping");
            Ok(EnvironmentMap::new())
        }
    }
}

fn parse_env_document(content: &str) -> Result<EnvironmentMap, String> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let mapping = match doc {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Ok(EnvironmentMap::new()),
        other => return Err(format!("expected a mapping, got {}", yaml_kind(&other))),
    };

    let mut env = EnvironmentMap::new();
    for (key, value) in mapping {
        let Some(key) = scalar_string(&key) else {
            tracing::warn!(key = ?key, "skipping env entry with a non-scalar key");
            continue;
        };
        match scalar_string(&value) {
            Some(value) => {
                env.insert(key, value);
            }
            None => tracing::warn!(key = %key, "skipping env entry with a non-scalar value"),
        }
    }
    Ok(env)
}

fn scalar_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(flag(*b)),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
