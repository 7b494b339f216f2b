// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes-only configuration.
//!
//! User-supplied objects (`namespace`, `service_account`, `extra_*`) are
//! plain `k8s-openapi` types and are passed through to the graph unchanged.

use super::ConfigError;
use indexmap::IndexMap;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{
    ConfigMap, Container, Namespace, PersistentVolume, PersistentVolumeClaim, Secret, Service,
    ServiceAccount, Volume,
};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use k8s_openapi::api::storage::v1::StorageClass;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagePullPolicy {
    Always,
    IfNotPresent,
    Never,
}

crate::simple_display! {
    ImagePullPolicy {
        Always => "Always",
        IfNotPresent => "IfNotPresent",
        Never => "Never",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    Never,
}

crate::simple_display! {
    RestartPolicy {
        Always => "Always",
        OnFailure => "OnFailure",
        Never => "Never",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    ClusterIP,
    NodePort,
    LoadBalancer,
    ExternalName,
}

crate::simple_display! {
    ServiceType {
        ClusterIP => "ClusterIP",
        NodePort => "NodePort",
        LoadBalancer => "LoadBalancer",
        ExternalName => "ExternalName",
    }
}

/// Port number or port name on the pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetPort {
    Number(i32),
    Name(String),
}

/// A port opened on the container and, when a service exists, exposed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub container_port: u16,
    /// Port exposed by the service; defaults to the container port.
    #[serde(default)]
    pub service_port: Option<u16>,
    /// Defaults to the port name, else the container port.
    #[serde(default)]
    pub target_port: Option<TargetPort>,
    #[serde(default)]
    pub node_port: Option<u16>,
    /// `TCP` when unset.
    #[serde(default)]
    pub protocol: Option<String>,
}

impl PortSpec {
    pub fn new(container_port: u16) -> Self {
        Self {
            name: None,
            container_port,
            service_port: None,
            target_port: None,
            node_port: None,
            protocol: None,
        }
    }
}

/// A pod volume plus where the primary container mounts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeSpec {
    pub mount_path: String,
    #[serde(default)]
    pub read_only: bool,
    pub volume: Volume,
}

/// Options that only affect the Kubernetes graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct K8sConfig {
    // Deployment
    pub replicas: i32,
    pub pod_name: Option<String>,
    pub deploy_name: Option<String>,
    pub secret_name: Option<String>,
    pub configmap_name: Option<String>,
    /// `IfNotPresent` when unset.
    pub image_pull_policy: Option<ImagePullPolicy>,
    pub pod_annotations: IndexMap<String, String>,
    pub pod_node_selector: Option<BTreeMap<String, String>>,
    /// `Always` when unset.
    pub restart_policy: Option<RestartPolicy>,
    pub deploy_labels: IndexMap<String, String>,
    pub termination_grace_period_seconds: Option<i64>,
    /// Topology key to spread pods across; no constraint when unset.
    pub topology_spread_key: Option<String>,
    pub topology_spread_max_skew: Option<i32>,
    /// `DoNotSchedule` or `ScheduleAnyway`.
    pub topology_spread_when_unsatisfiable: Option<String>,

    // Service
    pub create_service: bool,
    pub service_name: Option<String>,
    pub service_type: Option<ServiceType>,
    pub service_port: u16,
    pub service_node_port: Option<u16>,
    pub service_target_port: Option<TargetPort>,
    /// Extra ports exposed only by the service.
    pub service_ports: Vec<PortSpec>,
    pub service_labels: IndexMap<String, String>,
    pub service_annotations: IndexMap<String, String>,
    pub service_health_check_node_port: Option<i32>,
    pub service_internal_traffic_policy: Option<String>,
    pub service_load_balancer_class: Option<String>,
    pub service_load_balancer_ip: Option<String>,
    pub service_load_balancer_source_ranges: Option<Vec<String>>,
    pub service_allocate_load_balancer_node_ports: Option<bool>,

    // RBAC
    pub use_rbac: bool,
    pub ns_name: Option<String>,
    pub namespace: Option<Namespace>,
    pub sa_name: Option<String>,
    pub service_account: Option<ServiceAccount>,
    pub cr_name: Option<String>,
    pub cluster_role: Option<ClusterRole>,
    pub crb_name: Option<String>,
    pub cluster_role_binding: Option<ClusterRoleBinding>,

    // Passed through verbatim
    pub extra_secrets: Vec<Secret>,
    pub extra_configmaps: Vec<ConfigMap>,
    pub extra_services: Vec<Service>,
    pub extra_deployments: Vec<Deployment>,
    pub extra_pvs: Vec<PersistentVolume>,
    pub extra_pvcs: Vec<PersistentVolumeClaim>,
    pub extra_containers: Vec<Container>,
    pub extra_init_containers: Vec<Container>,
    pub extra_ports: Vec<PortSpec>,
    pub extra_volumes: Vec<VolumeSpec>,
    pub extra_storage_classes: Vec<StorageClass>,
    /// Arbitrary manifests (`apiVersion`, `kind`, `metadata`, ...).
    pub extra_custom_objects: Vec<serde_json::Value>,
    pub extra_crds: Vec<CustomResourceDefinition>,
}

impl Default for K8sConfig {
    fn default() -> Self {
        Self {
            replicas: 1,
            pod_name: None,
            deploy_name: None,
            secret_name: None,
            configmap_name: None,
            image_pull_policy: None,
            pod_annotations: IndexMap::new(),
            pod_node_selector: None,
            restart_policy: None,
            deploy_labels: IndexMap::new(),
            termination_grace_period_seconds: None,
            topology_spread_key: None,
            topology_spread_max_skew: None,
            topology_spread_when_unsatisfiable: None,
            create_service: false,
            service_name: None,
            service_type: None,
            service_port: 8000,
            service_node_port: None,
            service_target_port: None,
            service_ports: Vec::new(),
            service_labels: IndexMap::new(),
            service_annotations: IndexMap::new(),
            service_health_check_node_port: None,
            service_internal_traffic_policy: None,
            service_load_balancer_class: None,
            service_load_balancer_ip: None,
            service_load_balancer_source_ranges: None,
            service_allocate_load_balancer_node_ports: None,
            use_rbac: false,
            ns_name: None,
            namespace: None,
            sa_name: None,
            service_account: None,
            cr_name: None,
            cluster_role: None,
            crb_name: None,
            cluster_role_binding: None,
            extra_secrets: Vec::new(),
            extra_configmaps: Vec::new(),
            extra_services: Vec::new(),
            extra_deployments: Vec::new(),
            extra_pvs: Vec::new(),
            extra_pvcs: Vec::new(),
            extra_containers: Vec::new(),
            extra_init_containers: Vec::new(),
            extra_ports: Vec::new(),
            extra_volumes: Vec::new(),
            extra_storage_classes: Vec::new(),
            extra_custom_objects: Vec::new(),
            extra_crds: Vec::new(),
        }
    }
}

const WHEN_UNSATISFIABLE: &[&str] = &["DoNotSchedule", "ScheduleAnyway"];

impl K8sConfig {
    crate::setters! {
        set {
            replicas: i32,
            create_service: bool,
            service_port: u16,
            use_rbac: bool,
            pod_annotations: IndexMap<String, String>,
            deploy_labels: IndexMap<String, String>,
            service_labels: IndexMap<String, String>,
            service_ports: Vec<PortSpec>,
            extra_secrets: Vec<Secret>,
            extra_configmaps: Vec<ConfigMap>,
            extra_services: Vec<Service>,
            extra_deployments: Vec<Deployment>,
            extra_containers: Vec<Container>,
            extra_ports: Vec<PortSpec>,
            extra_volumes: Vec<VolumeSpec>,
            extra_custom_objects: Vec<serde_json::Value>,
        }
        option {
            pod_name: String,
            deploy_name: String,
            secret_name: String,
            configmap_name: String,
            image_pull_policy: ImagePullPolicy,
            restart_policy: RestartPolicy,
            termination_grace_period_seconds: i64,
            topology_spread_key: String,
            topology_spread_max_skew: i32,
            topology_spread_when_unsatisfiable: String,
            service_name: String,
            service_type: ServiceType,
            service_node_port: u16,
            service_target_port: TargetPort,
            ns_name: String,
            sa_name: String,
            cr_name: String,
            crb_name: String,
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.replicas < 0 {
            return Err(ConfigError::Invalid {
                field: "k8s.replicas",
                reason: format!("must not be negative, got {}", self.replicas),
            });
        }
        if let Some(skew) = self.topology_spread_max_skew {
            if skew < 1 {
                return Err(ConfigError::Invalid {
                    field: "k8s.topology_spread_max_skew",
                    reason: format!("must be at least 1, got {}", skew),
                });
            }
        }
        if let Some(when) = &self.topology_spread_when_unsatisfiable {
            if !WHEN_UNSATISFIABLE.contains(&when.as_str()) {
                return Err(ConfigError::Invalid {
                    field: "k8s.topology_spread_when_unsatisfiable",
                    reason: format!("expected one of {:?}, got {:?}", WHEN_UNSATISFIABLE, when),
                });
            }
        }
        if self.service_node_port.is_some()
            && !matches!(self.service_type, Some(ServiceType::NodePort | ServiceType::LoadBalancer))
        {
            return Err(ConfigError::Invalid {
                field: "k8s.service_node_port",
                reason: "requires service_type NodePort or LoadBalancer".to_string(),
            });
        }
        Ok(())
    }
}
