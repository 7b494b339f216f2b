// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform build contexts.
//!
//! A build context carries the platform identifiers that the app config does
//! not own (Docker network, Kubernetes namespace, AWS region). Each builder
//! takes its own context type; [`BuildContext`] is only used by the dispatcher.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target platform of a resource graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Docker,
    #[serde(rename = "kubernetes", alias = "k8s")]
    K8s,
    #[serde(rename = "ecs", alias = "aws")]
    Aws,
}

crate::simple_display! {
    Platform {
        Docker => "docker",
        K8s => "kubernetes",
        Aws => "ecs",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerBuildContext {
    pub network: String,
}

impl DockerBuildContext {
    pub fn new(network: impl Into<String>) -> Self {
        Self { network: network.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct K8sBuildContext {
    pub namespace: String,
    pub service_account_name: Option<String>,
    /// Common labels applied to every generated object.
    pub labels: IndexMap<String, String>,
}

impl K8sBuildContext {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), ..Default::default() }
    }

    crate::setters! {
        set {
            labels: IndexMap<String, String>,
        }
        option {
            service_account_name: String,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsBuildContext {
    /// Used when the app config does not name a region.
    pub aws_region: Option<String>,
}

impl AwsBuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        option {
            aws_region: String,
        }
    }
}

/// A build context for any platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum BuildContext {
    Docker(DockerBuildContext),
    #[serde(rename = "kubernetes")]
    K8s(K8sBuildContext),
    #[serde(rename = "ecs")]
    Aws(AwsBuildContext),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("expected a {expected} build context, got {actual}")]
pub struct ContextMismatch {
    pub expected: Platform,
    pub actual: Platform,
}

impl BuildContext {
    pub fn platform(&self) -> Platform {
        match self {
            BuildContext::Docker(_) => Platform::Docker,
            BuildContext::K8s(_) => Platform::K8s,
            BuildContext::Aws(_) => Platform::Aws,
        }
    }

    pub fn as_docker(&self) -> Result<&DockerBuildContext, ContextMismatch> {
        match self {
            BuildContext::Docker(ctx) => Ok(ctx),
            other => Err(other.mismatch(Platform::Docker)),
        }
    }

    pub fn as_k8s(&self) -> Result<&K8sBuildContext, ContextMismatch> {
        match self {
            BuildContext::K8s(ctx) => Ok(ctx),
            other => Err(other.mismatch(Platform::K8s)),
        }
    }

    pub fn as_aws(&self) -> Result<&AwsBuildContext, ContextMismatch> {
        match self {
            BuildContext::Aws(ctx) => Ok(ctx),
            other => Err(other.mismatch(Platform::Aws)),
        }
    }

    fn mismatch(&self, expected: Platform) -> ContextMismatch {
        ContextMismatch { expected, actual: self.platform() }
    }
}

impl From<DockerBuildContext> for BuildContext {
    fn from(ctx: DockerBuildContext) -> Self {
        BuildContext::Docker(ctx)
    }
}

impl From<K8sBuildContext> for BuildContext {
    fn from(ctx: K8sBuildContext) -> Self {
        BuildContext::K8s(ctx)
    }
}

impl From<AwsBuildContext> for BuildContext {
    fn from(ctx: AwsBuildContext) -> Self {
        BuildContext::Aws(ctx)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
