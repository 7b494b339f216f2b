// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform dispatch and the resource-group registry.
//!
//! [`build`] owns the error policy shared by every builder: hard errors
//! ([`BuildError::is_hard`]) are returned, anything else is logged and the
//! app simply has no graph for that platform.

use crate::aws::{self, AwsResourceGraph, SubnetResolver};
use crate::docker::{self, DockerResourceGraph};
use crate::k8s::{self, K8sResourceGraph};
use crate::BuildError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sw_core::{AppConfig, BuildContext, Platform, SecretStore};

/// A built graph for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", content = "graph", rename_all = "lowercase")]
pub enum ResourceGraph {
    Docker(DockerResourceGraph),
    #[serde(rename = "kubernetes")]
    K8s(K8sResourceGraph),
    #[serde(rename = "ecs")]
    Aws(AwsResourceGraph),
}

impl ResourceGraph {
    pub fn platform(&self) -> Platform {
        match self {
            ResourceGraph::Docker(_) => Platform::Docker,
            ResourceGraph::K8s(_) => Platform::K8s,
            ResourceGraph::Aws(_) => Platform::Aws,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResourceGraph::Docker(g) => &g.name,
            ResourceGraph::K8s(g) => &g.name,
            ResourceGraph::Aws(g) => &g.name,
        }
    }
}

/// External services a builder may consult.
#[derive(Clone, Copy, Default)]
pub struct Collaborators<'a> {
    pub secrets: Option<&'a dyn SecretStore>,
    /// Required for the ECS graph.
    pub subnets: Option<&'a dyn SubnetResolver>,
}

impl<'a> Collaborators<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secrets(mut self, store: &'a dyn SecretStore) -> Self {
        self.secrets = Some(store);
        self
    }

    pub fn subnets(mut self, resolver: &'a dyn SubnetResolver) -> Self {
        self.subnets = Some(resolver);
        self
    }
}

/// Build the graph for `platform`, applying the error policy.
///
/// Returns `Ok(None)` when the context belongs to another platform or the
/// build failed with a soft error.
pub fn build(
    config: &AppConfig,
    platform: Platform,
    ctx: &BuildContext,
    collaborators: Collaborators<'_>,
) -> Result<Option<ResourceGraph>, BuildError> {
    match dispatch(config, platform, ctx, collaborators) {
        Ok(graph) => Ok(Some(graph)),
        Err(e) if e.is_hard() => Err(e),
        Err(e) => {
            tracing::error!(app = %config.name, %platform, error = %e, "could not build resource graph");
            Ok(None)
        }
    }
}

fn dispatch(
    config: &AppConfig,
    platform: Platform,
    ctx: &BuildContext,
    collaborators: Collaborators<'_>,
) -> Result<ResourceGraph, BuildError> {
    match platform {
        Platform::Docker => {
            let ctx = ctx.as_docker()?;
            Ok(ResourceGraph::Docker(docker::build(config, ctx, collaborators.secrets)?))
        }
        Platform::K8s => {
            let ctx = ctx.as_k8s()?;
            Ok(ResourceGraph::K8s(k8s::build(config, ctx, collaborators.secrets)?))
        }
        Platform::Aws => {
            let ctx = ctx.as_aws()?;
            let subnets = collaborators.subnets.ok_or_else(|| BuildError::Resolution {
                what: "subnet resolver",
                reason: "the ecs graph needs a SubnetResolver".to_string(),
            })?;
            Ok(ResourceGraph::Aws(aws::build(config, ctx, subnets, collaborators.secrets)?))
        }
    }
}

/// Built graphs per platform, keyed by app name in insertion order.
///
/// Re-initializing an app replaces its graph in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroups {
    pub docker: IndexMap<String, DockerResourceGraph>,
    pub k8s: IndexMap<String, K8sResourceGraph>,
    pub aws: IndexMap<String, AwsResourceGraph>,
}

impl ResourceGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_docker(
        &mut self,
        config: &AppConfig,
        ctx: &BuildContext,
        collaborators: Collaborators<'_>,
    ) -> Result<bool, BuildError> {
        self.init(config, Platform::Docker, ctx, collaborators)
    }

    pub fn init_k8s(
        &mut self,
        config: &AppConfig,
        ctx: &BuildContext,
        collaborators: Collaborators<'_>,
    ) -> Result<bool, BuildError> {
        self.init(config, Platform::K8s, ctx, collaborators)
    }

    pub fn init_aws(
        &mut self,
        config: &AppConfig,
        ctx: &BuildContext,
        collaborators: Collaborators<'_>,
    ) -> Result<bool, BuildError> {
        self.init(config, Platform::Aws, ctx, collaborators)
    }

    /// Build and store the graph; `Ok(false)` when no graph was produced.
    pub fn init(
        &mut self,
        config: &AppConfig,
        platform: Platform,
        ctx: &BuildContext,
        collaborators: Collaborators<'_>,
    ) -> Result<bool, BuildError> {
        let Some(graph) = build(config, platform, ctx, collaborators)? else {
            return Ok(false);
        };
        tracing::info!(app = %graph.name(), platform = %graph.platform(), "initialized resource group");
        self.insert(graph);
        Ok(true)
    }

    pub fn insert(&mut self, graph: ResourceGraph) {
        match graph {
            ResourceGraph::Docker(g) => {
                self.docker.insert(g.name.clone(), g);
            }
            ResourceGraph::K8s(g) => {
                self.k8s.insert(g.name.clone(), g);
            }
            ResourceGraph::Aws(g) => {
                self.aws.insert(g.name.clone(), g);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.docker.is_empty() && self.k8s.is_empty() && self.aws.is_empty()
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
