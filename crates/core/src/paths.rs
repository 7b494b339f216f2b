// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-container paths derived from the workspace root.

use crate::config::{AppConfig, WorkspaceLayout};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("workspace root is not set")]
    MissingRoot,

    #[error("cannot derive a workspace name from {0}")]
    Unresolvable(PathBuf),
}

/// Absolute paths inside the container, computed once per build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPaths {
    pub workspace_name: String,
    /// Mount point of the workspace volume.
    pub workspace_parent: String,
    pub workspace_root: String,
    pub scripts_dir: String,
    pub storage_dir: String,
    pub meta_dir: String,
    pub products_dir: String,
    pub notebooks_dir: String,
    pub workflows_dir: String,
    pub workspace_config_dir: String,
    pub requirements_file: String,
}

impl ContainerPaths {
    /// Resolve the paths for a workspace mounted under `parent`.
    ///
    /// With `include_workspace_name` the workspace lives at
    /// `{parent}/{workspace_name}`, otherwise directly at `parent`.
    pub fn resolve(
        workspace_root: Option<&Path>,
        parent: &str,
        layout: &WorkspaceLayout,
        requirements_file: &str,
        include_workspace_name: bool,
    ) -> Result<Self, PathError> {
        let root = workspace_root.ok_or(PathError::MissingRoot)?;
        let workspace_name = root
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| PathError::Unresolvable(root.to_path_buf()))?
            .to_string();

        let parent = match parent.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let workspace_root = if include_workspace_name {
            join(parent, &workspace_name)
        } else {
            parent.to_string()
        };
        let under_root = |dir: &str| join(&workspace_root, dir);

        Ok(Self {
            scripts_dir: under_root(&layout.scripts_dir),
            storage_dir: under_root(&layout.storage_dir),
            meta_dir: under_root(&layout.meta_dir),
            products_dir: under_root(&layout.products_dir),
            notebooks_dir: under_root(&layout.notebooks_dir),
            workflows_dir: under_root(&layout.workflows_dir),
            workspace_config_dir: under_root(&layout.config_dir),
            requirements_file: under_root(requirements_file),
            workspace_parent: parent.to_string(),
            workspace_root,
            workspace_name,
        })
    }

    /// Resolve using the app's workspace section.
    pub fn for_app(config: &AppConfig, include_workspace_name: bool) -> Result<Self, PathError> {
        Self::resolve(
            config.workspace.root.as_deref(),
            &config.workspace.container_path,
            &config.workspace.layout,
            &config.requirements_file,
            include_workspace_name,
        )
    }
}

fn join(base: &str, child: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, child)
    } else {
        format!("{}/{}", base, child)
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
