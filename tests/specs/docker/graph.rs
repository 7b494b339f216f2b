// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker graphs built from config files.

use crate::prelude::*;
use similar_asserts::assert_eq;
use serde_json::json;

fn docker_graph(config: &AppConfig) -> sw_adapters::DockerResourceGraph {
    match graph::build(config, Platform::Docker, &docker_ctx(), Collaborators::new()) {
        Ok(Some(ResourceGraph::Docker(graph))) => graph,
        other => panic!("expected a docker graph, got {other:?}"),
    }
}

/// Env file values sit under inline env, which wins ties in place
#[test]
fn env_layers_in_precedence_order() {
    let temp = Project::empty();
    temp.file("env/api.yml", "LOG_LEVEL: debug\nWORKERS: 4\nDEBUG: true\n");
    let config = temp.config(
        "api.toml",
        r#"
name = "api"
env_file = "{dir}/env/api.yml"

[env]
LOG_LEVEL = "info"

[secrets]
API_KEY = "s3cr3t"

[workspace]
root = "{root}"
"#,
    );

    let graph = docker_graph(&config);
    let env = &graph.containers[0].environment;
    let tail: Vec<(&str, &str)> =
        env.iter().rev().take(4).rev().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(tail, [("LOG_LEVEL", "info"), ("WORKERS", "4"), ("DEBUG", "True"), ("API_KEY", "s3cr3t")]);
    assert_eq!(env.get("PHIDATA_RUNTIME").map(String::as_str), Some("docker"));
    assert_eq!(env.get("PYTHONPATH").map(String::as_str), Some("/usr/local/server/acme"));
}

/// A missing env file is reported, not silently skipped
#[test]
fn missing_env_file_yields_no_graph() {
    let temp = Project::empty();
    let config = temp.config(
        "api.toml",
        r#"
name = "api"
env_file = "{dir}/env/missing.yml"

[workspace]
root = "{root}"
"#,
    );
    let result = graph::build(&config, Platform::Docker, &docker_ctx(), Collaborators::new());
    assert!(result.unwrap().is_none());
}

/// Run spec keeps the engine's port and volume map shapes
#[test]
fn run_spec_matches_the_engine_shapes() {
    let temp = Project::empty();
    let config = temp.config(
        "api.toml",
        r#"
name = "api"
open_container_port = true
container_port = 8080
container_host_port = 3333

[workspace]
root = "{root}"
mount = true

[docker.ports]
"8080" = 9999
"2222/tcp" = ["127.0.0.1", 2222]

[docker.volumes]
"/var/run/docker.sock" = { bind = "/var/run/docker.sock", mode = "ro" }
"#,
    );

    let graph = docker_graph(&config);
    assert_eq!(graph.network.name, "acme-net");
    let container = serde_json::to_value(&graph.containers[0]).unwrap();
    assert_eq!(container["name"], "api-container");
    assert_eq!(container["network"], "acme-net");
    assert_eq!(container["ports"], json!({"8080": 3333, "2222/tcp": ["127.0.0.1", 2222]}));
    assert_eq!(
        container["volumes"],
        json!({
            "/var/run/docker.sock": {"bind": "/var/run/docker.sock", "mode": "ro"},
            temp.root().display().to_string(): {"bind": "/usr/local/server/acme", "mode": "rw"},
        })
    );
}

/// EmptyDir workspaces cannot be provided by Docker
#[test]
fn empty_dir_workspace_is_a_hard_error() {
    let temp = Project::empty();
    let config = temp.config(
        "api.toml",
        r#"
name = "api"

[workspace]
root = "{root}"
mount = true
volume_type = "EmptyDir"
"#,
    );
    let err = graph::build(&config, Platform::Docker, &docker_ctx(), Collaborators::new()).unwrap_err();
    assert!(matches!(err, BuildError::Mount(_)), "{err}");
}
