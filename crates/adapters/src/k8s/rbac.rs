// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Namespace, service account and cluster-role wiring.

use super::meta;
use k8s_openapi::api::core::v1::{Namespace, ServiceAccount};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef, Subject};
use sw_core::{naming, AppConfig, K8sBuildContext};

pub(super) struct Rbac {
    pub namespace: Option<Namespace>,
    pub service_account: Option<ServiceAccount>,
    pub cluster_role: Option<ClusterRole>,
    pub cluster_role_binding: Option<ClusterRoleBinding>,
    /// Namespace for every namespaced object.
    pub ns_name: String,
    /// Service account the pods run as; cluster default when unset.
    pub sa_name: Option<String>,
}

/// Resolve names and, with `use_rbac`, generate whatever objects the user
/// did not supply. User-supplied objects are kept even without `use_rbac`.
pub(super) fn resolve(config: &AppConfig, ctx: &K8sBuildContext) -> Rbac {
    let k8s = &config.k8s;
    let app = config.name.as_str();
    let common = &ctx.labels;

    let mut rbac = Rbac {
        namespace: k8s.namespace.clone(),
        service_account: k8s.service_account.clone(),
        cluster_role: k8s.cluster_role.clone(),
        cluster_role_binding: k8s.cluster_role_binding.clone(),
        ns_name: k8s.ns_name.clone().unwrap_or_else(|| ctx.namespace.clone()),
        sa_name: k8s.sa_name.clone().or_else(|| ctx.service_account_name.clone()),
    };
    if !k8s.use_rbac {
        return rbac;
    }

    let namespace = rbac.namespace.get_or_insert_with(|| Namespace {
        metadata: meta(&rbac.ns_name, None, app, &[common]),
        ..Default::default()
    });
    if let Some(name) = &namespace.metadata.name {
        rbac.ns_name = name.clone();
    }

    let default_sa = rbac.sa_name.clone().unwrap_or_else(|| naming::service_account(app));
    let service_account = rbac.service_account.get_or_insert_with(|| ServiceAccount {
        metadata: meta(&default_sa, Some(rbac.ns_name.as_str()), app, &[common]),
        ..Default::default()
    });
    let sa_name = service_account.metadata.name.clone().unwrap_or(default_sa);

    let default_cr = k8s.cr_name.clone().unwrap_or_else(|| naming::cluster_role(app));
    let cluster_role = rbac.cluster_role.get_or_insert_with(|| ClusterRole {
        metadata: meta(&default_cr, None, app, &[common]),
        rules: Some(policy_rules()),
        ..Default::default()
    });
    let cr_name = cluster_role.metadata.name.clone().unwrap_or(default_cr);

    if rbac.cluster_role_binding.is_none() {
        let crb_name = k8s.crb_name.clone().unwrap_or_else(|| naming::cluster_role_binding(app));
        rbac.cluster_role_binding = Some(ClusterRoleBinding {
            metadata: meta(&crb_name, None, app, &[common]),
            role_ref: RoleRef {
                api_group: "rbac.authorization.k8s.io".to_string(),
                kind: "ClusterRole".to_string(),
                name: cr_name,
            },
            subjects: Some(vec![Subject {
                kind: "ServiceAccount".to_string(),
                name: sa_name.clone(),
                namespace: Some(rbac.ns_name.clone()),
                ..Default::default()
            }]),
        });
    }

    rbac.sa_name = Some(sa_name);
    rbac
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Manage pods, secrets and config maps; read pod logs.
fn policy_rules() -> Vec<PolicyRule> {
    vec![
        PolicyRule {
            api_groups: Some(strings(&[""])),
            resources: Some(strings(&["pods", "secrets", "configmaps"])),
            verbs: strings(&["get", "list", "watch", "create", "update", "patch", "delete"]),
            ..Default::default()
        },
        PolicyRule {
            api_groups: Some(strings(&[""])),
            resources: Some(strings(&["pods/logs"])),
            verbs: strings(&["get", "list"]),
            ..Default::default()
        },
    ]
}
