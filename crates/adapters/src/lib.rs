// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-adapters: resource-graph builders for Docker, Kubernetes and AWS ECS.
//!
//! # Module layout
//!
//! - [`docker`] — network + container run spec
//! - [`k8s`] — namespace/RBAC/ConfigMap/Secret/Deployment/Service objects
//! - [`aws`] — ECS cluster, task definition, service and ELB wiring
//! - [`graph`] — platform dispatch, error policy and the resource-group registry

pub mod aws;
pub mod docker;
mod error;
pub mod graph;
pub mod k8s;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aws::{AwsResourceGraph, LookupError, SubnetResolver};
pub use docker::{DockerContainer, DockerNetwork, DockerResourceGraph};
pub use error::BuildError;
pub use graph::{Collaborators, ResourceGraph, ResourceGroups};
pub use k8s::{K8sResourceGraph, RenderError};
