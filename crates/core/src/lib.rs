// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-core: application configuration and the platform-independent
//! resolution steps shared by every resource-graph builder.

pub mod macros;

pub mod config;
pub mod context;
pub mod env;
pub mod mount;
pub mod naming;
pub mod paths;
pub mod settings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{
    AppConfig, AwsConfig, CommandSpec, ConfigError, DockerConfig, DockerRestartPolicy,
    DockerVolumeBind, EcsCluster, Format, GitSyncConfig, HostBinding, ImagePullPolicy, ImageRef,
    K8sConfig, LifecyclePolicy, LoadBalancer, PortSpec, ResourceFlags, RestartPolicy, ServiceType,
    TargetPort, UserSpec, VolumeSpec, WorkspaceConfig, WorkspaceLayout, WorkspaceVolumeType,
};
pub use context::{
    AwsBuildContext, BuildContext, ContextMismatch, DockerBuildContext, K8sBuildContext, Platform,
};
pub use env::{EnvError, EnvironmentMap, SecretStore, SecretStoreError};
pub use mount::{GitSync, MountError, MountPlan};
pub use paths::{ContainerPaths, PathError};
pub use settings::Settings;
