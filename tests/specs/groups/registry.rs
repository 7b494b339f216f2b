// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource groups across apps and platforms.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn app(temp: &Project, name: &str) -> AppConfig {
    temp.config(
        &format!("{name}.toml"),
        &format!(
            r#"
name = "{name}"

[workspace]
root = "{{root}}"

[aws]
subnets = ["subnet-a"]
"#
        ),
    )
}

/// Every app gets a graph per platform, keyed by name in load order
#[test]
fn apps_are_grouped_per_platform() {
    let temp = Project::empty();
    let apps = [app(&temp, "web"), app(&temp, "api"), app(&temp, "worker")];
    let subnets = FakeSubnetResolver::new().with_subnet("subnet-a", "vpc-1");
    let collaborators = Collaborators::new().subnets(&subnets);

    let mut groups = ResourceGroups::new();
    for config in &apps {
        assert!(groups.init_docker(config, &docker_ctx(), collaborators).unwrap());
        assert!(groups.init_k8s(config, &k8s_ctx(), collaborators).unwrap());
        assert!(groups.init_aws(config, &aws_ctx(), collaborators).unwrap());
    }

    let order = ["web", "api", "worker"];
    assert_eq!(groups.docker.keys().map(String::as_str).collect::<Vec<_>>(), order);
    assert_eq!(groups.k8s.keys().map(String::as_str).collect::<Vec<_>>(), order);
    assert_eq!(groups.aws.keys().map(String::as_str).collect::<Vec<_>>(), order);
    assert_eq!(groups.k8s["api"].deployments[0].metadata.name.as_deref(), Some("api-deploy"));
    assert_eq!(groups.aws["worker"].ecs_services[0].name, "worker-service");
}

/// A context for the wrong platform leaves the group untouched
#[test]
fn mismatched_context_stores_nothing() {
    let temp = Project::empty();
    let config = app(&temp, "web");
    let mut groups = ResourceGroups::new();
    assert!(!groups.init_k8s(&config, &docker_ctx(), Collaborators::new()).unwrap());
    assert!(groups.is_empty());
}

/// Graphs round-trip through JSON with their platform tag
#[test]
fn graphs_serialize_with_platform_tags() {
    let temp = Project::empty();
    let config = app(&temp, "web");
    let graph = graph::build(&config, Platform::Docker, &docker_ctx(), Collaborators::new())
        .unwrap()
        .unwrap();
    let json = serde_json::to_string(&graph).unwrap();
    let back: ResourceGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
    assert_eq!(back.platform(), Platform::Docker);
}
