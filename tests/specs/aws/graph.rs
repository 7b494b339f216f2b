// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ECS graphs built from config files.

use crate::prelude::*;
use similar_asserts::assert_eq;

const API_APP: &str = r#"
name = "api"
command = "uvicorn main:app --host 0.0.0.0"
aws_secrets = ["prod/api"]

[env]
LOG_LEVEL = "info"

[workspace]
root = "{root}"

[aws]
subnets = ["subnet-a", "subnet-b"]
security_groups = ["sg-web"]
ecs_task_cpu = "512"
ecs_task_memory = "1024"
ecs_service_count = 2

[lifecycle]
skip_delete = true
"#;

fn resolver() -> FakeSubnetResolver {
    FakeSubnetResolver::new().with_subnet("subnet-a", "vpc-1").with_subnet("subnet-b", "vpc-1")
}

/// The ECS graph wires the service to the task definition and target group
#[test]
fn ecs_graph_from_config() {
    let temp = Project::empty();
    let config = temp.config("api.toml", API_APP);
    let secrets = FakeSecretStore::new().with_secret("prod/api", &[("DB_URL", "postgres://db")]);
    let subnets = resolver();
    let collaborators = Collaborators::new().secrets(&secrets).subnets(&subnets);

    let graph = match graph::build(&config, Platform::Aws, &aws_ctx(), collaborators) {
        Ok(Some(ResourceGraph::Aws(graph))) => graph,
        other => panic!("expected an ecs graph, got {other:?}"),
    };

    let td = &graph.ecs_task_definitions[0];
    assert_eq!((td.cpu.as_str(), td.memory.as_str()), ("512", "1024"));
    let container = &td.containers[0];
    assert_eq!(
        container.command.as_deref(),
        Some(&["uvicorn".to_string(), "main:app".into(), "--host".into(), "0.0.0.0".into()][..])
    );
    let env: Vec<(&str, &str)> =
        container.environment.iter().map(|kv| (kv.name.as_str(), kv.value.as_str())).collect();
    assert!(env.contains(&("PHIDATA_RUNTIME", "ecs")));
    assert!(env.contains(&("PHI_WORKSPACE_ROOT", "/usr/local/server")));
    assert!(env.contains(&("DB_URL", "postgres://db")));
    assert!(env.contains(&("LOG_LEVEL", "info")));
    assert!(!env.iter().any(|(name, _)| *name == "PYTHONPATH"));

    let service = &graph.ecs_services[0];
    assert_eq!(service.desired_count, 2);
    assert_eq!(service.task_definition, td.name);
    assert_eq!(service.target_group, graph.target_groups[0].name);
    assert_eq!(graph.target_groups[0].vpc_id, "vpc-1");
    assert!(service.flags.skip_delete);
    assert_eq!(
        serde_json::to_value(&service.network_configuration).unwrap(),
        serde_json::json!({
            "awsvpcConfiguration": {
                "subnets": ["subnet-a", "subnet-b"],
                "securityGroups": ["sg-web"],
                "assignPublicIp": "ENABLED",
            }
        })
    );
}

/// Subnets from two VPCs cannot share a load balancer
#[test]
fn subnets_across_vpcs_fail_the_build() {
    let temp = Project::empty();
    let config = temp.config("api.toml", API_APP);
    let subnets = FakeSubnetResolver::new().with_subnet("subnet-a", "vpc-1").with_subnet("subnet-b", "vpc-2");
    let err = graph::build(&config, Platform::Aws, &aws_ctx(), Collaborators::new().subnets(&subnets))
        .unwrap_err();
    match err {
        BuildError::MultiVpc { vpcs } => assert_eq!(vpcs, ["vpc-1", "vpc-2"]),
        other => panic!("expected MultiVpc, got {other}"),
    }
}

/// Without a region there is nothing to build, but nothing fails either
#[test]
fn missing_region_yields_no_graph() {
    let temp = Project::empty();
    let config = temp.config("api.toml", API_APP);
    let subnets = resolver();
    let ctx: BuildContext = AwsBuildContext::new().into();
    let result = graph::build(&config, Platform::Aws, &ctx, Collaborators::new().subnets(&subnets));
    assert!(result.unwrap().is_none());
    assert!(subnets.lookups().is_empty());
}
