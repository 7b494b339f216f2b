// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes resource graph.
//!
//! # Module layout
//!
//! - [`rbac`] — Namespace, ServiceAccount, ClusterRole, ClusterRoleBinding
//! - [`pod`] — containers, volumes and the Deployment
//! - [`service`] — the Service in front of the Deployment
//!
//! # Assembly
//!
//! ```text
//!   rbac (use_rbac)  ─▶ ns / sa / cr / crb
//!   compose_plain    ─▶ ConfigMap  {app}-cm
//!   secret_data      ─▶ Secret     {app}-secret   (when non-empty)
//!   mount plan       ─▶ workspace volume + git-sync containers
//!   primary container, inserted first
//!   Deployment       {app}-deploy
//!   Service          {app}-svc                    (create_service)
//! ```
//!
//! User-supplied `extra_*` objects come first in every list and generated
//! objects are appended after them. Nothing is deduplicated by name.

mod pod;
mod rbac;
mod service;

use crate::BuildError;
use indexmap::IndexMap;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{
    ConfigMap, Namespace, PersistentVolume, PersistentVolumeClaim, Secret, Service, ServiceAccount,
};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use k8s_openapi::api::storage::v1::StorageClass;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use sw_core::env::{self, SecretStore};
use sw_core::{naming, AppConfig, ContainerPaths, K8sBuildContext, MountPlan, Platform};
use thiserror::Error;

pub use pod::{DEFAULT_CONTAINER_ANNOTATION, POD_SELECTOR_LABEL};

/// Errors from rendering a graph to manifests.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Every object needed to run one app on Kubernetes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct K8sResourceGraph {
    pub name: String,
    pub enabled: bool,
    pub namespace: Option<Namespace>,
    pub service_account: Option<ServiceAccount>,
    pub cluster_role: Option<ClusterRole>,
    pub cluster_role_binding: Option<ClusterRoleBinding>,
    pub secrets: Vec<Secret>,
    pub config_maps: Vec<ConfigMap>,
    pub storage_classes: Vec<StorageClass>,
    pub services: Vec<Service>,
    pub deployments: Vec<Deployment>,
    pub custom_objects: Vec<serde_json::Value>,
    pub crds: Vec<CustomResourceDefinition>,
    pub pvs: Vec<PersistentVolume>,
    pub pvcs: Vec<PersistentVolumeClaim>,
}

impl K8sResourceGraph {
    /// Manifests in apply order: cluster-scoped identity first, then storage,
    /// CRDs, env sources, workloads, services and custom objects.
    pub fn objects(&self) -> Result<Vec<serde_json::Value>, RenderError> {
        let mut objects = Vec::new();
        push_opt(&mut objects, &self.namespace)?;
        push_opt(&mut objects, &self.service_account)?;
        push_opt(&mut objects, &self.cluster_role)?;
        push_opt(&mut objects, &self.cluster_role_binding)?;
        push_all(&mut objects, &self.storage_classes)?;
        push_all(&mut objects, &self.pvs)?;
        push_all(&mut objects, &self.pvcs)?;
        push_all(&mut objects, &self.crds)?;
        push_all(&mut objects, &self.secrets)?;
        push_all(&mut objects, &self.config_maps)?;
        push_all(&mut objects, &self.deployments)?;
        push_all(&mut objects, &self.services)?;
        objects.extend(self.custom_objects.iter().cloned());
        Ok(objects)
    }

    /// Multi-document YAML stream of [`K8sResourceGraph::objects`].
    pub fn to_yaml(&self) -> Result<String, RenderError> {
        let docs = self
            .objects()?
            .iter()
            .map(serde_yaml::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(docs.join("---\n"))
    }
}

fn push_opt<T: Serialize>(
    out: &mut Vec<serde_json::Value>,
    object: &Option<T>,
) -> Result<(), RenderError> {
    if let Some(object) = object {
        out.push(serde_json::to_value(object)?);
    }
    Ok(())
}

fn push_all<T: Serialize>(
    out: &mut Vec<serde_json::Value>,
    objects: &[T],
) -> Result<(), RenderError> {
    for object in objects {
        out.push(serde_json::to_value(object)?);
    }
    Ok(())
}

/// Object metadata with the app label merged over `labels`.
pub(crate) fn meta(
    name: &str,
    namespace: Option<&str>,
    app: &str,
    labels: &[&IndexMap<String, String>],
) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: namespace.map(str::to_string),
        labels: Some(app_labels(app, labels)),
        ..Default::default()
    }
}

/// Merge label maps left to right, then pin the app selector label.
pub(crate) fn app_labels(app: &str, labels: &[&IndexMap<String, String>]) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = BTreeMap::new();
    for map in labels {
        merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged.insert(POD_SELECTOR_LABEL.to_string(), app.to_string());
    merged
}

/// Build the Kubernetes graph for `config`.
pub fn build(
    config: &AppConfig,
    ctx: &K8sBuildContext,
    secrets: Option<&dyn SecretStore>,
) -> Result<K8sResourceGraph, BuildError> {
    let k8s = &config.k8s;
    let app = config.name.as_str();
    let paths = ContainerPaths::for_app(config, true)?;

    // (1) RBAC
    let rbac = rbac::resolve(config, ctx);
    let ns_name = rbac.ns_name.as_str();
    let common = &ctx.labels;

    // (2) Env split into a ConfigMap and a Secret
    let mut config_maps = k8s.extra_configmaps.clone();
    let mut secret_objects = k8s.extra_secrets.clone();

    let base = env::base_env(Platform::K8s, &paths, config);
    let plain = env::compose_plain(base, config)?;
    config_maps.push(ConfigMap {
        metadata: meta(
            &k8s.configmap_name.clone().unwrap_or_else(|| naming::configmap(app)),
            Some(ns_name),
            app,
            &[common],
        ),
        data: Some(plain.into_iter().collect()),
        ..Default::default()
    });

    let secret_data = env::secret_data(config, secrets)?;
    if !secret_data.is_empty() {
        secret_objects.push(Secret {
            metadata: meta(
                &k8s.secret_name.clone().unwrap_or_else(|| naming::secret(app)),
                Some(ns_name),
                app,
                &[common],
            ),
            string_data: Some(secret_data.into_iter().collect()),
            ..Default::default()
        });
    }
    let env_from = pod::env_from(&config_maps, &secret_objects);

    // (3) Workspace volume and git-sync
    let plan = MountPlan::resolve(config, &paths, Platform::K8s)?;
    let mut volumes = k8s.extra_volumes.clone();
    let mut containers = k8s.extra_containers.clone();
    let mut init_containers = k8s.extra_init_containers.clone();
    if let Some(workspace) = pod::workspace_volume(&plan) {
        if let Some(git_sync) = plan.git_sync() {
            let (sidecar, init) = pod::git_sync_containers(git_sync, &env_from, &workspace);
            containers.push(sidecar);
            init_containers.extend(init);
        }
        volumes.push(workspace);
    }

    // (4) Primary container, first in the pod
    let ports = pod::port_specs(config);
    let primary = pod::primary_container(config, &env_from, &ports, &volumes);
    let primary_name = primary.name.clone();
    containers.insert(0, primary);

    // (5) Deployment
    let mut deployments = k8s.extra_deployments.clone();
    let deployment = pod::deployment(
        config,
        pod::DeploymentParts {
            namespace: ns_name,
            service_account_name: rbac.sa_name.as_deref(),
            common_labels: common,
            primary_container: &primary_name,
            containers,
            init_containers,
            volumes: &volumes,
        },
    );

    // (6) Service
    let mut services = k8s.extra_services.clone();
    if k8s.create_service {
        services.push(service::service(config, ns_name, common, &deployment, &ports));
    }
    deployments.push(deployment);

    tracing::debug!(
        app,
        namespace = ns_name,
        deployments = deployments.len(),
        services = services.len(),
        "built kubernetes resource graph"
    );

    Ok(K8sResourceGraph {
        name: config.name.clone(),
        enabled: config.enabled,
        namespace: rbac.namespace,
        service_account: rbac.service_account,
        cluster_role: rbac.cluster_role,
        cluster_role_binding: rbac.cluster_role_binding,
        secrets: secret_objects,
        config_maps,
        storage_classes: k8s.extra_storage_classes.clone(),
        services,
        deployments,
        custom_objects: k8s.extra_custom_objects.clone(),
        crds: k8s.extra_crds.clone(),
        pvs: k8s.extra_pvs.clone(),
        pvcs: k8s.extra_pvcs.clone(),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
