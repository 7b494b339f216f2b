// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the workspace specs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use sw_adapters::graph::{self, Collaborators, ResourceGraph, ResourceGroups};
pub use sw_adapters::test_support::{FakeSecretStore, FakeSubnetResolver};
pub use sw_adapters::BuildError;
pub use sw_core::{
    AppConfig, AwsBuildContext, BuildContext, ConfigError, DockerBuildContext, K8sBuildContext,
    Platform,
};

/// A scratch directory holding a workspace (`acme/`) and config files.
///
/// `{root}` in config text is replaced with the workspace root and `{dir}`
/// with the scratch directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("acme")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.path().join("acme")
    }

    /// Write a file relative to the scratch directory.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, self.expand(content)).unwrap();
        path
    }

    /// Write and load a config file.
    pub fn config(&self, rel: &str, content: &str) -> AppConfig {
        let path = self.file(rel, content);
        AppConfig::load(&path).unwrap()
    }

    pub fn load(&self, rel: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::load(&self.path().join(rel))
    }

    fn expand(&self, content: &str) -> String {
        content
            .replace("{root}", &self.root().display().to_string())
            .replace("{dir}", &self.path().display().to_string())
    }
}

pub fn docker_ctx() -> BuildContext {
    DockerBuildContext::new("acme-net").into()
}

pub fn k8s_ctx() -> BuildContext {
    K8sBuildContext::new("apps").into()
}

pub fn aws_ctx() -> BuildContext {
    AwsBuildContext::new().aws_region("us-east-1").into()
}
