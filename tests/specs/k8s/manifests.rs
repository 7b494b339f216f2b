// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes manifests rendered from config files.

use crate::prelude::*;
use similar_asserts::assert_eq;
use serde::Deserialize;

fn k8s_graph(config: &AppConfig) -> sw_adapters::K8sResourceGraph {
    match graph::build(config, Platform::K8s, &k8s_ctx(), Collaborators::new()) {
        Ok(Some(ResourceGraph::K8s(graph))) => graph,
        other => panic!("expected a kubernetes graph, got {other:?}"),
    }
}

fn documents(yaml: &str) -> Vec<serde_json::Value> {
    serde_yaml::Deserializer::from_str(yaml)
        .map(|doc| serde_json::Value::deserialize(doc).unwrap())
        .collect()
}

const WEB_APP: &str = r#"
name = "web"
image = { name = "acme/web", tag = "3.0" }
open_container_port = true
container_port = 8080

[env]
LOG_LEVEL = "info"

[secrets]
SESSION_KEY = "k"

[workspace]
root = "{root}"
mount = true

[workspace.git_sync]
create_sidecar = true
repo = "https://github.com/acme/acme.git"
branch = "main"

[k8s]
replicas = 2
create_service = true
service_port = 8000
use_rbac = true
"#;

/// The rendered stream lists every object in apply order
#[test]
fn yaml_stream_is_in_apply_order() {
    let temp = Project::empty();
    let graph = k8s_graph(&temp.config("web.toml", WEB_APP));
    let docs = documents(&graph.to_yaml().unwrap());
    let kinds: Vec<&str> = docs.iter().map(|d| d["kind"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        [
            "Namespace",
            "ServiceAccount",
            "ClusterRole",
            "ClusterRoleBinding",
            "Secret",
            "ConfigMap",
            "Deployment",
            "Service",
        ]
    );
}

/// Open port 8080 with service port 8000 is served by a Service that
/// selects exactly the Deployment's pods
#[test]
fn service_fronts_the_deployment() {
    let temp = Project::empty();
    let graph = k8s_graph(&temp.config("web.toml", WEB_APP));
    let docs = documents(&graph.to_yaml().unwrap());
    let deploy = docs.iter().find(|d| d["kind"] == "Deployment").unwrap();
    let service = docs.iter().find(|d| d["kind"] == "Service").unwrap();

    let container = &deploy["spec"]["template"]["spec"]["containers"][0];
    assert_eq!(container["ports"][0]["containerPort"], 8080);
    assert_eq!(service["spec"]["ports"][0]["port"], 8000);
    assert_eq!(service["spec"]["ports"][0]["targetPort"], "http");
    assert_eq!(service["spec"]["selector"], deploy["spec"]["selector"]["matchLabels"]);
    assert_eq!(service["spec"]["selector"]["app"], "web");
    assert_eq!(deploy["spec"]["template"]["metadata"]["labels"]["app"], "web");
}

/// Pods run the app first, then git-sync; a one-shot clone runs before them
#[test]
fn git_synced_workspace() {
    let temp = Project::empty();
    let graph = k8s_graph(&temp.config("web.toml", WEB_APP));
    let docs = documents(&graph.to_yaml().unwrap());
    let deploy = docs.iter().find(|d| d["kind"] == "Deployment").unwrap();
    let pod = &deploy["spec"]["template"];

    assert_eq!(pod["metadata"]["annotations"]["kubectl.kubernetes.io/default-container"], "web-container");
    let names: Vec<&str> = pod["spec"]["containers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["web-container", "git-sync"]);
    assert_eq!(pod["spec"]["initContainers"][0]["name"], "git-sync-init");
    assert_eq!(pod["spec"]["volumes"][0]["name"], "web-acme-ws");
    assert_eq!(pod["spec"]["volumes"][0]["emptyDir"], serde_json::json!({}));

    let sync_env = &pod["spec"]["containers"][1]["env"];
    let value = |name: &str| {
        sync_env.as_array().unwrap().iter().find(|e| e["name"] == name).map(|e| e["value"].clone())
    };
    assert_eq!(value("GIT_SYNC_REPO"), Some("https://github.com/acme/acme.git".into()));
    assert_eq!(value("GIT_SYNC_ROOT"), Some("/usr/local/server".into()));
    assert_eq!(value("GIT_SYNC_DEST"), Some("acme".into()));
    assert_eq!(value("GIT_SYNC_BRANCH"), Some("main".into()));
}

/// Secrets land in the Secret, everything else in the ConfigMap
#[test]
fn env_is_split_between_config_map_and_secret() {
    let temp = Project::empty();
    let graph = k8s_graph(&temp.config("web.toml", WEB_APP));

    let data = graph.config_maps[0].data.as_ref().unwrap();
    assert_eq!(data.get("LOG_LEVEL").map(String::as_str), Some("info"));
    assert_eq!(data.get("PHIDATA_RUNTIME").map(String::as_str), Some("kubernetes"));
    assert!(!data.contains_key("SESSION_KEY"));

    let secret = graph.secrets[0].string_data.as_ref().unwrap();
    assert_eq!(secret.get("SESSION_KEY").map(String::as_str), Some("k"));
    assert_eq!(secret.len(), 1);
}
