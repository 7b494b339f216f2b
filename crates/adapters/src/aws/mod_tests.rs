// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{FakeSecretStore, FakeSubnetResolver};
use similar_asserts::assert_eq;
use sw_core::test_support::{env_map, unmounted_app};
use sw_core::{AwsConfig, CommandSpec, LifecyclePolicy, ResourceFlags};

fn resolver() -> FakeSubnetResolver {
    FakeSubnetResolver::new().with_subnet("subnet-a", "vpc-1").with_subnet("subnet-b", "vpc-1")
}

fn aws_app(name: &str) -> AppConfig {
    unmounted_app(name).aws(
        AwsConfig::default()
            .region("us-east-1")
            .subnets(vec!["subnet-a".to_string(), "subnet-b".to_string()])
            .security_groups(vec!["sg-1".to_string()]),
    )
}

fn env_value<'a>(container: &'a EcsContainer, name: &str) -> Option<&'a str> {
    container.environment.iter().find(|kv| kv.name == name).map(|kv| kv.value.as_str())
}

#[test]
fn default_graph_names_and_wiring() {
    let graph = build(&aws_app("api"), &AwsBuildContext::new(), &resolver(), None).unwrap();

    assert_eq!(graph.name, "api");
    let cluster = &graph.ecs_clusters[0];
    assert_eq!(cluster.name, "api-cluster");
    assert_eq!(cluster.ecs_cluster_name, "api");
    assert_eq!(cluster.capacity_providers, ["FARGATE"]);

    let lb = &graph.load_balancers[0];
    assert_eq!(lb.name, "api-lb");
    assert_eq!(lb.subnets, ["subnet-a", "subnet-b"]);
    assert_eq!(lb.security_groups, ["sg-1"]);

    let tg = &graph.target_groups[0];
    assert_eq!(
        (tg.name.as_str(), tg.port, tg.protocol.as_str(), tg.vpc_id.as_str(), tg.target_type.as_str()),
        ("api-tg", 8080, "HTTP", "vpc-1", "ip")
    );

    let listener = &graph.listeners[0];
    assert_eq!(listener.name, "api-listener");
    assert_eq!((listener.protocol.as_str(), listener.port), ("HTTP", 80));
    assert_eq!((listener.load_balancer.as_str(), listener.target_group.as_str()), ("api-lb", "api-tg"));

    let td = &graph.ecs_task_definitions[0];
    assert_eq!((td.name.as_str(), td.family.as_str(), td.network_mode.as_str()), ("api-td", "api", "awsvpc"));
    assert_eq!((td.cpu.as_str(), td.memory.as_str()), ("256", "512"));
    assert_eq!(td.requires_compatibilities, ["FARGATE"]);

    let service = &graph.ecs_services[0];
    assert_eq!(service.name, "api-service");
    assert_eq!((service.cluster.as_str(), service.task_definition.as_str()), ("api-cluster", "api-td"));
    assert_eq!((service.target_container_name.as_str(), service.target_container_port), ("api", 8080));
    assert_eq!(service.desired_count, 1);
    assert!(service.force_delete && service.force_new_deployment);
}

#[test]
fn container_definition() {
    let config = aws_app("api")
        .image(sw_core::ImageRef::new("acme/api", "2.0"))
        .command(CommandSpec::from("uvicorn main:app --port 8080"))
        .env(env_map(&[("LOG_LEVEL", "info")]));
    let graph = build(&config, &AwsBuildContext::new(), &resolver(), None).unwrap();
    let container = &graph.ecs_task_definitions[0].containers[0];

    assert_eq!(container.name, "api");
    assert_eq!(container.image, "acme/api:2.0");
    assert_eq!(container.port_mappings, [PortMapping { container_port: 8080 }]);
    assert_eq!(
        container.command,
        Some(vec!["uvicorn".to_string(), "main:app".to_string(), "--port".to_string(), "8080".to_string()])
    );
    assert!(container.entry_point.is_none());

    assert_eq!(env_value(container, "PHIDATA_RUNTIME"), Some("ecs"));
    assert_eq!(env_value(container, "PYTHONPATH"), None);
    assert_eq!(env_value(container, "PHI_WORKSPACE_ROOT"), Some("/usr/local/server"));
    assert_eq!(env_value(container, "PHI_SCRIPTS_DIR"), Some("/usr/local/server/scripts"));
    assert_eq!(env_value(container, "AWS_REGION"), Some("us-east-1"));
    assert_eq!(env_value(container, "LOG_LEVEL"), Some("info"));

    assert_eq!(
        serde_json::to_value(&container.log_configuration).unwrap(),
        serde_json::json!({
            "logDriver": "awslogs",
            "options": {
                "awslogs-group": "api",
                "awslogs-region": "us-east-1",
                "awslogs-create-group": "true",
                "awslogs-stream-prefix": "api",
            }
        })
    );
}

#[test]
fn network_configuration_json() {
    let graph = build(&aws_app("api"), &AwsBuildContext::new(), &resolver(), None).unwrap();
    assert_eq!(
        serde_json::to_value(&graph.ecs_services[0].network_configuration).unwrap(),
        serde_json::json!({
            "awsvpcConfiguration": {
                "subnets": ["subnet-a", "subnet-b"],
                "securityGroups": ["sg-1"],
                "assignPublicIp": "ENABLED",
            }
        })
    );

    let mut private = aws_app("api");
    private.aws.assign_public_ip = false;
    let graph = build(&private, &AwsBuildContext::new(), &resolver(), None).unwrap();
    let vpc = &graph.ecs_services[0].network_configuration.awsvpc_configuration;
    assert_eq!(vpc.assign_public_ip, None);
}

#[test]
fn secrets_reach_the_container_env() {
    let store = FakeSecretStore::new().with_secret("prod/api", &[("DB_URL", "postgres://")]);
    let config = aws_app("api").aws_secrets(vec!["prod/api".to_string()]);
    let graph = build(&config, &AwsBuildContext::new(), &resolver(), Some(&store)).unwrap();
    let container = &graph.ecs_task_definitions[0].containers[0];
    assert_eq!(env_value(container, "DB_URL"), Some("postgres://"));
}

#[test]
fn region_falls_back_to_the_context() {
    let mut config = aws_app("api");
    config.aws.region = None;
    let resolver = resolver();
    let graph =
        build(&config, &AwsBuildContext::new().aws_region("eu-west-1"), &resolver, None).unwrap();
    let container = &graph.ecs_task_definitions[0].containers[0];
    assert_eq!(container.log_configuration.options.get("awslogs-region").map(String::as_str), Some("eu-west-1"));
    assert!(resolver.lookups().iter().all(|(_, region)| region == "eu-west-1"));
}

#[test]
fn config_region_wins_over_the_context() {
    let ctx = AwsBuildContext::new().aws_region("eu-west-1");
    assert_eq!(region(&aws_app("api"), &ctx).unwrap(), "us-east-1");
}

#[test]
fn missing_region_is_a_soft_error() {
    let mut config = aws_app("api");
    config.aws.region = None;
    let err = build(&config, &AwsBuildContext::new(), &resolver(), None).unwrap_err();
    assert!(matches!(err, BuildError::Resolution { what: "aws region", .. }));
    assert!(!err.is_hard());
}

#[test]
fn multiple_vpcs_fail_hard() {
    let resolver = resolver().with_subnet("subnet-c", "vpc-2");
    let mut config = aws_app("api");
    config.aws.subnets.push("subnet-c".to_string());
    let err = build(&config, &AwsBuildContext::new(), &resolver, None).unwrap_err();
    assert!(matches!(err, BuildError::MultiVpc { .. }));
    assert!(err.is_hard());
}

#[test]
fn user_supplied_cluster_and_load_balancer_are_kept() {
    let cluster = EcsCluster {
        name: "shared".to_string(),
        ecs_cluster_name: "shared-cluster".to_string(),
        capacity_providers: vec!["FARGATE_SPOT".to_string()],
        flags: ResourceFlags::default(),
    };
    let elb = LoadBalancer {
        name: "edge".to_string(),
        subnets: vec!["subnet-a".to_string()],
        security_groups: Vec::new(),
        flags: ResourceFlags::default(),
    };
    let mut config = aws_app("api");
    config.aws.ecs_cluster = Some(cluster.clone());
    config.aws.elb = Some(elb.clone());

    let graph = build(&config, &AwsBuildContext::new(), &resolver(), None).unwrap();
    assert_eq!(graph.ecs_clusters, [cluster]);
    assert_eq!(graph.load_balancers, [elb]);
    assert_eq!(graph.ecs_services[0].cluster, "shared");
    assert_eq!(graph.listeners[0].load_balancer, "edge");
}

#[test]
fn lifecycle_flags_reach_every_resource() {
    let lifecycle = LifecyclePolicy { skip_delete: true, wait_for_creation: false, ..Default::default() };
    let config = aws_app("api").lifecycle(lifecycle);
    let graph = build(&config, &AwsBuildContext::new(), &resolver(), None).unwrap();
    let expected = ResourceFlags {
        skip_create: false,
        skip_delete: true,
        wait_for_creation: false,
        wait_for_deletion: true,
    };

    let td = &graph.ecs_task_definitions[0];
    let flags = [
        graph.ecs_clusters[0].flags,
        graph.load_balancers[0].flags,
        graph.target_groups[0].flags,
        graph.listeners[0].flags,
        td.flags,
        td.containers[0].flags,
        graph.ecs_services[0].flags,
    ];
    assert!(flags.iter().all(|f| *f == expected), "{flags:?}");
}
