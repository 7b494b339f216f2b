// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace volume configuration.
//!
//! The workspace is made visible inside the container one of two ways:
//!
//! - **HostPath**: the host's workspace root is mounted directly. Default on
//!   Docker, where containers run on the developer's machine.
//! - **EmptyDir**: an ephemeral volume, optionally filled by a git-sync
//!   sidecar. Default on Kubernetes.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the workspace volume is provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkspaceVolumeType {
    HostPath,
    EmptyDir,
}

crate::simple_display! {
    WorkspaceVolumeType {
        HostPath => "HostPath",
        EmptyDir => "EmptyDir",
    }
}

/// Directory names inside the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceLayout {
    pub scripts_dir: String,
    pub storage_dir: String,
    pub meta_dir: String,
    pub products_dir: String,
    pub notebooks_dir: String,
    pub workflows_dir: String,
    pub config_dir: String,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            scripts_dir: "scripts".to_string(),
            storage_dir: "storage".to_string(),
            meta_dir: "meta".to_string(),
            products_dir: "products".to_string(),
            notebooks_dir: "notebooks".to_string(),
            workflows_dir: "workflows".to_string(),
            config_dir: "workspace".to_string(),
        }
    }
}

/// Git-sync sidecar settings (Kubernetes EmptyDir workspaces only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitSyncConfig {
    pub create_sidecar: bool,
    /// Clone once before the main container starts.
    pub create_init_container: bool,
    pub image_name: String,
    pub image_tag: String,
    pub repo: Option<String>,
    pub branch: Option<String>,
    /// Seconds between syncs.
    pub wait: Option<u32>,
}

impl Default for GitSyncConfig {
    fn default() -> Self {
        Self {
            create_sidecar: false,
            create_init_container: true,
            image_name: "k8s.gcr.io/git-sync".to_string(),
            image_tag: "v3.1.1".to_string(),
            repo: None,
            branch: None,
            wait: Some(1),
        }
    }
}

impl GitSyncConfig {
    crate::setters! {
        into {
            image_name: String,
            image_tag: String,
        }
        set {
            create_sidecar: bool,
            create_init_container: bool,
            wait: Option<u32>,
        }
        option {
            repo: String,
            branch: String,
        }
    }
}

/// Where the workspace lives and how it is mounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Workspace root on the host. Its file stem is the workspace name.
    pub root: Option<PathBuf>,
    /// Mount the workspace into the container.
    pub mount: bool,
    pub volume_name: Option<String>,
    /// Unset means HostPath on Docker and EmptyDir on Kubernetes.
    pub volume_type: Option<WorkspaceVolumeType>,
    /// Parent directory of the workspace inside the container.
    pub container_path: String,
    /// Host directory for HostPath mounts; defaults to `root`.
    pub host_path: Option<String>,
    pub layout: WorkspaceLayout,
    pub git_sync: GitSyncConfig,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            mount: false,
            volume_name: None,
            volume_type: None,
            container_path: "/usr/local/server".to_string(),
            host_path: None,
            layout: WorkspaceLayout::default(),
            git_sync: GitSyncConfig::default(),
        }
    }
}

impl WorkspaceConfig {
    crate::setters! {
        into {
            container_path: String,
        }
        set {
            mount: bool,
            layout: WorkspaceLayout,
            git_sync: GitSyncConfig,
        }
        option {
            root: PathBuf,
            volume_name: String,
            volume_type: WorkspaceVolumeType,
            host_path: String,
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if !self.container_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "workspace.container_path",
                reason: format!("must be absolute, got {:?}", self.container_path),
            });
        }
        let host_path_only = self.volume_type == Some(WorkspaceVolumeType::HostPath);
        if self.mount && self.git_sync.create_sidecar && !host_path_only && self.git_sync.repo.is_none()
        {
            return Err(ConfigError::MissingGitSyncRepo);
        }
        Ok(())
    }
}
