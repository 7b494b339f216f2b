// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pod template and Deployment construction.

use super::{app_labels, meta};
use indexmap::IndexMap;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    ConfigMap, ConfigMapEnvSource, Container, ContainerPort, EmptyDirVolumeSource, EnvFromSource,
    EnvVar, HostPathVolumeSource, PodSpec, PodTemplateSpec, Secret, SecretEnvSource,
    TopologySpreadConstraint, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use std::collections::BTreeMap;
use sw_core::mount::{GitSync, GIT_SYNC_CONTAINER, GIT_SYNC_INIT_CONTAINER};
use sw_core::{naming, AppConfig, ImagePullPolicy, MountPlan, PortSpec, RestartPolicy, TargetPort, VolumeSpec};

/// Tells `kubectl logs`/`exec` which container to target.
pub const DEFAULT_CONTAINER_ANNOTATION: &str = "kubectl.kubernetes.io/default-container";

/// Label tying pods to their Deployment and Service.
pub const POD_SELECTOR_LABEL: &str = "app";

/// `envFrom` entries for every config map and secret in the graph.
pub(super) fn env_from(config_maps: &[ConfigMap], secrets: &[Secret]) -> Vec<EnvFromSource> {
    let config_map_refs = config_maps.iter().filter_map(|cm| cm.metadata.name.clone()).map(|name| {
        EnvFromSource {
            config_map_ref: Some(ConfigMapEnvSource { name, optional: None }),
            ..Default::default()
        }
    });
    let secret_refs = secrets.iter().filter_map(|s| s.metadata.name.clone()).map(|name| {
        EnvFromSource {
            secret_ref: Some(SecretEnvSource { name, optional: None }),
            ..Default::default()
        }
    });
    config_map_refs.chain(secret_refs).collect()
}

/// Pod volume for the workspace, if the plan mounts one.
pub(super) fn workspace_volume(plan: &MountPlan) -> Option<VolumeSpec> {
    match plan {
        MountPlan::HostPath { volume_name, host_path, mount_path } => Some(VolumeSpec {
            mount_path: mount_path.clone(),
            read_only: false,
            volume: Volume {
                name: volume_name.clone(),
                host_path: Some(HostPathVolumeSource { path: host_path.clone(), type_: None }),
                ..Default::default()
            },
        }),
        MountPlan::EmptyDir { volume_name, mount_path, .. } => Some(VolumeSpec {
            mount_path: mount_path.clone(),
            read_only: false,
            volume: Volume {
                name: volume_name.clone(),
                empty_dir: Some(EmptyDirVolumeSource::default()),
                ..Default::default()
            },
        }),
        MountPlan::None | MountPlan::Bind { .. } => None,
    }
}

fn volume_mount(spec: &VolumeSpec) -> VolumeMount {
    VolumeMount {
        name: spec.volume.name.clone(),
        mount_path: spec.mount_path.clone(),
        read_only: spec.read_only.then_some(true),
        ..Default::default()
    }
}

fn env_vars(env: sw_core::EnvironmentMap) -> Vec<EnvVar> {
    env.into_iter()
        .map(|(name, value)| EnvVar { name, value: Some(value), ..Default::default() })
        .collect()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// The git-sync sidecar and, when enabled, its one-shot init container.
pub(super) fn git_sync_containers(
    git_sync: &GitSync,
    env_from: &[EnvFromSource],
    workspace: &VolumeSpec,
) -> (Container, Option<Container>) {
    let sidecar = Container {
        name: GIT_SYNC_CONTAINER.to_string(),
        image: Some(git_sync.image.clone()),
        env: Some(env_vars(git_sync.sidecar_env())),
        env_from: non_empty(env_from.to_vec()),
        volume_mounts: Some(vec![volume_mount(workspace)]),
        ..Default::default()
    };
    let init = git_sync.create_init_container.then(|| Container {
        name: GIT_SYNC_INIT_CONTAINER.to_string(),
        env: Some(env_vars(git_sync.init_env())),
        ..sidecar.clone()
    });
    (sidecar, init)
}

/// Ports opened on the primary container: `extra_ports`, then the app port.
pub(super) fn port_specs(config: &AppConfig) -> Vec<PortSpec> {
    let mut ports = config.k8s.extra_ports.clone();
    if config.open_container_port {
        ports.push(PortSpec {
            name: Some(config.container_port_name.clone()),
            container_port: config.container_port,
            service_port: Some(config.k8s.service_port),
            target_port: Some(
                config
                    .k8s
                    .service_target_port
                    .clone()
                    .unwrap_or_else(|| TargetPort::Name(config.container_port_name.clone())),
            ),
            node_port: config.k8s.service_node_port,
            protocol: None,
        });
    }
    ports
}

pub(super) fn primary_container(
    config: &AppConfig,
    env_from: &[EnvFromSource],
    ports: &[PortSpec],
    volumes: &[VolumeSpec],
) -> Container {
    let container_ports = ports
        .iter()
        .map(|port| ContainerPort {
            name: port.name.clone(),
            container_port: i32::from(port.container_port),
            protocol: port.protocol.clone(),
            ..Default::default()
        })
        .collect();
    let pull_policy = config.k8s.image_pull_policy.unwrap_or(ImagePullPolicy::IfNotPresent);

    Container {
        name: config.container_name.clone().unwrap_or_else(|| naming::container(&config.name)),
        image: Some(config.image_str()),
        // Docker CMD
        args: config.command.as_ref().map(|c| c.to_args()),
        // Docker ENTRYPOINT
        command: config.entrypoint.as_ref().map(|c| c.to_args()),
        image_pull_policy: Some(pull_policy.to_string()),
        env_from: non_empty(env_from.to_vec()),
        ports: non_empty(container_ports),
        volume_mounts: non_empty(volumes.iter().map(volume_mount).collect()),
        ..Default::default()
    }
}

pub(super) struct DeploymentParts<'a> {
    pub namespace: &'a str,
    pub service_account_name: Option<&'a str>,
    pub common_labels: &'a IndexMap<String, String>,
    pub primary_container: &'a str,
    pub containers: Vec<Container>,
    pub init_containers: Vec<Container>,
    pub volumes: &'a [VolumeSpec],
}

pub(super) fn deployment(config: &AppConfig, parts: DeploymentParts<'_>) -> Deployment {
    let k8s = &config.k8s;
    let app = config.name.as_str();
    let selector: BTreeMap<String, String> =
        [(POD_SELECTOR_LABEL.to_string(), app.to_string())].into_iter().collect();

    let mut annotations = BTreeMap::new();
    annotations.insert(DEFAULT_CONTAINER_ANNOTATION.to_string(), parts.primary_container.to_string());
    annotations.extend(k8s.pod_annotations.iter().map(|(k, v)| (k.clone(), v.clone())));

    let topology_spread_constraints = k8s.topology_spread_key.as_ref().map(|key| {
        vec![TopologySpreadConstraint {
            topology_key: key.clone(),
            max_skew: k8s.topology_spread_max_skew.unwrap_or(1),
            when_unsatisfiable: k8s
                .topology_spread_when_unsatisfiable
                .clone()
                .unwrap_or_else(|| "DoNotSchedule".to_string()),
            label_selector: Some(LabelSelector {
                match_labels: Some(selector.clone()),
                ..Default::default()
            }),
            ..Default::default()
        }]
    });

    let pod_spec = PodSpec {
        containers: parts.containers,
        init_containers: non_empty(parts.init_containers),
        node_selector: k8s.pod_node_selector.clone(),
        restart_policy: Some(k8s.restart_policy.unwrap_or(RestartPolicy::Always).to_string()),
        service_account_name: parts.service_account_name.map(str::to_string),
        termination_grace_period_seconds: k8s.termination_grace_period_seconds,
        topology_spread_constraints,
        volumes: non_empty(parts.volumes.iter().map(|spec| spec.volume.clone()).collect()),
        ..Default::default()
    };

    let deploy_name = k8s.deploy_name.clone().unwrap_or_else(|| naming::deployment(app));
    let pod_name = k8s.pod_name.clone().unwrap_or_else(|| naming::pod(app));

    Deployment {
        metadata: meta(&deploy_name, Some(parts.namespace), app, &[parts.common_labels, &k8s.deploy_labels]),
        spec: Some(DeploymentSpec {
            replicas: Some(k8s.replicas),
            selector: LabelSelector { match_labels: Some(selector), ..Default::default() },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    name: Some(pod_name),
                    labels: Some(app_labels(app, &[parts.common_labels, &config.container_labels])),
                    annotations: Some(annotations),
                    ..Default::default()
                }),
                spec: Some(pod_spec),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
#[path = "pod_tests.rs"]
mod tests;
