// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace mount resolution.
//!
//! | volume type      | docker            | kubernetes                  |
//! |------------------|-------------------|-----------------------------|
//! | HostPath         | bind mount, rw    | hostPath volume             |
//! | EmptyDir         | unsupported       | emptyDir (+ git-sync)       |
//! | unset            | bind mount, rw    | emptyDir (+ git-sync)       |

use crate::config::{AppConfig, WorkspaceVolumeType};
use crate::context::Platform;
use crate::env::EnvironmentMap;
use crate::naming;
use crate::paths::ContainerPaths;
use thiserror::Error;

pub const GIT_SYNC_CONTAINER: &str = "git-sync";
pub const GIT_SYNC_INIT_CONTAINER: &str = "git-sync-init";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("{volume_type} workspace volumes are not supported on {platform}")]
    Unsupported { volume_type: WorkspaceVolumeType, platform: Platform },

    #[error("git-sync sidecar requested but no repository is configured")]
    MissingGitSyncRepo,
}

/// Git-sync containers that fill an EmptyDir workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSync {
    pub image: String,
    /// Environment shared by the sidecar and the init container.
    pub env: EnvironmentMap,
    pub create_init_container: bool,
}

impl GitSync {
    pub fn sidecar_env(&self) -> EnvironmentMap {
        self.env.clone()
    }

    /// Init container env: a one-shot sync, then the shared variables.
    pub fn init_env(&self) -> EnvironmentMap {
        let mut env = EnvironmentMap::new();
        env.insert("GIT_SYNC_ONE_TIME".to_string(), "true".to_string());
        env.extend(self.env.clone());
        env
    }
}

/// How the workspace is made visible inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountPlan {
    /// Workspace not mounted.
    None,
    /// Docker bind mount.
    Bind { host_path: String, container_path: String, mode: String },
    /// Kubernetes hostPath volume.
    HostPath { volume_name: String, host_path: String, mount_path: String },
    /// Kubernetes emptyDir volume, optionally filled by git-sync.
    EmptyDir { volume_name: String, mount_path: String, git_sync: Option<GitSync> },
}

impl MountPlan {
    pub fn resolve(
        config: &AppConfig,
        paths: &ContainerPaths,
        platform: Platform,
    ) -> Result<Self, MountError> {
        let workspace = &config.workspace;
        if !workspace.mount {
            return Ok(MountPlan::None);
        }

        let host_path = || {
            workspace.host_path.clone().unwrap_or_else(|| match &workspace.root {
                Some(root) => root.display().to_string(),
                None => String::new(),
            })
        };
        let volume_name = || {
            workspace
                .volume_name
                .clone()
                .unwrap_or_else(|| naming::workspace_volume(&config.name, &paths.workspace_name))
        };

        match (platform, workspace.volume_type) {
            (Platform::Docker, None | Some(WorkspaceVolumeType::HostPath)) => Ok(MountPlan::Bind {
                host_path: host_path(),
                container_path: paths.workspace_root.clone(),
                mode: "rw".to_string(),
            }),
            (Platform::Docker, Some(volume_type)) => {
                Err(MountError::Unsupported { volume_type, platform })
            }
            (Platform::K8s, Some(WorkspaceVolumeType::HostPath)) => Ok(MountPlan::HostPath {
                volume_name: volume_name(),
                host_path: host_path(),
                mount_path: paths.workspace_root.clone(),
            }),
            (Platform::K8s, None | Some(WorkspaceVolumeType::EmptyDir)) => {
                let git_sync = git_sync(config, paths)?;
                Ok(MountPlan::EmptyDir {
                    volume_name: volume_name(),
                    mount_path: paths.workspace_parent.clone(),
                    git_sync,
                })
            }
            (Platform::Aws, _) => {
                tracing::debug!(app = %config.name, "workspace mounts are not used on ecs");
                Ok(MountPlan::None)
            }
        }
    }

    pub fn volume_name(&self) -> Option<&str> {
        match self {
            MountPlan::HostPath { volume_name, .. } | MountPlan::EmptyDir { volume_name, .. } => {
                Some(volume_name)
            }
            MountPlan::None | MountPlan::Bind { .. } => None,
        }
    }

    pub fn git_sync(&self) -> Option<&GitSync> {
        match self {
            MountPlan::EmptyDir { git_sync, .. } => git_sync.as_ref(),
            _ => None,
        }
    }
}

fn git_sync(config: &AppConfig, paths: &ContainerPaths) -> Result<Option<GitSync>, MountError> {
    let settings = &config.workspace.git_sync;
    if !settings.create_sidecar {
        return Ok(None);
    }
    let Some(repo) = &settings.repo else {
        return Err(MountError::MissingGitSyncRepo);
    };

    let mut env = EnvironmentMap::new();
    env.insert("GIT_SYNC_REPO".to_string(), repo.clone());
    env.insert("GIT_SYNC_ROOT".to_string(), paths.workspace_parent.clone());
    env.insert("GIT_SYNC_DEST".to_string(), paths.workspace_name.clone());
    if let Some(branch) = &settings.branch {
        env.insert("GIT_SYNC_BRANCH".to_string(), branch.clone());
    }
    if let Some(wait) = settings.wait {
        env.insert("GIT_SYNC_WAIT".to_string(), wait.to_string());
    }
    Ok(Some(GitSync {
        image: format!("{}:{}", settings.image_name, settings.image_tag),
        env,
        create_init_container: settings.create_init_container,
    }))
}

#[cfg(test)]
#[path = "mount_tests.rs"]
mod tests;
