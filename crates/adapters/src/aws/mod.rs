// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AWS resource graph: an ECS service behind an application load balancer.
//!
//! ```text
//!   EcsCluster {app}-cluster ◀── EcsService {app}-service ──▶ EcsTaskDefinition {app}-td
//!                                      │                              └─ EcsContainer
//!                                      ▼
//!   LoadBalancer {app}-lb ◀── Listener {app}-listener ──▶ TargetGroup {app}-tg (HTTP, ip)
//! ```
//!
//! The workspace is never mounted on ECS; paths are resolved without the
//! workspace-name suffix so the image's own layout is used.

mod ecs;
mod vpc;

pub use ecs::{
    AwsVpcConfiguration, EcsContainer, EcsService, EcsTaskDefinition, KeyValuePair, Listener,
    LogConfiguration, NetworkConfiguration, PortMapping, TargetGroup,
};
pub use vpc::{LookupError, SubnetResolver};

use crate::BuildError;
use serde::{Deserialize, Serialize};
use sw_core::env::{self, SecretStore};
use sw_core::{naming, AppConfig, AwsBuildContext, ContainerPaths, EcsCluster, LoadBalancer, Platform};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsResourceGraph {
    pub name: String,
    pub enabled: bool,
    pub ecs_clusters: Vec<EcsCluster>,
    pub ecs_task_definitions: Vec<EcsTaskDefinition>,
    pub ecs_services: Vec<EcsService>,
    pub load_balancers: Vec<LoadBalancer>,
    pub target_groups: Vec<TargetGroup>,
    pub listeners: Vec<Listener>,
}

/// Region from the app config, else the build context.
pub fn region(config: &AppConfig, ctx: &AwsBuildContext) -> Result<String, BuildError> {
    config.aws.region.clone().or_else(|| ctx.aws_region.clone()).ok_or_else(|| {
        BuildError::Resolution {
            what: "aws region",
            reason: "set aws.region or the build context's aws_region".to_string(),
        }
    })
}

/// Build the ECS graph for `config`.
pub fn build(
    config: &AppConfig,
    ctx: &AwsBuildContext,
    subnets: &dyn SubnetResolver,
    secrets: Option<&dyn SecretStore>,
) -> Result<AwsResourceGraph, BuildError> {
    let aws = &config.aws;
    let app = config.name.as_str();
    let flags = config.lifecycle.flags();
    let region = region(config, ctx)?;

    let paths = ContainerPaths::for_app(config, false)?;
    let mut base = env::base_env(Platform::Aws, &paths, config);
    base.insert(env::AWS_REGION.to_string(), region.clone());
    base.insert(env::AWS_DEFAULT_REGION.to_string(), region.clone());
    let environment = env::compose(base, config, secrets)?;

    let cluster = aws.ecs_cluster.clone().unwrap_or_else(|| EcsCluster {
        name: naming::ecs_cluster(app),
        ecs_cluster_name: app.to_string(),
        capacity_providers: vec![aws.ecs_launch_type.clone()],
        flags,
    });
    let load_balancer = aws.elb.clone().unwrap_or_else(|| LoadBalancer {
        name: naming::load_balancer(app),
        subnets: aws.subnets.clone(),
        security_groups: aws.security_groups.clone(),
        flags,
    });

    let vpc_id = vpc::single_vpc(&aws.subnets, &region, subnets)?;

    let target_group = TargetGroup {
        name: naming::target_group(app),
        port: config.container_port,
        protocol: "HTTP".to_string(),
        vpc_id,
        target_type: "ip".to_string(),
        flags,
    };
    let listener = Listener {
        name: naming::listener(app),
        protocol: "HTTP".to_string(),
        port: 80,
        load_balancer: load_balancer.name.clone(),
        target_group: target_group.name.clone(),
        flags,
    };

    let container = EcsContainer {
        name: config.container_name.clone().unwrap_or_else(|| app.to_string()),
        image: config.image_str(),
        port_mappings: vec![PortMapping { container_port: config.container_port }],
        entry_point: config.entrypoint.as_ref().map(|c| c.split_args()),
        command: config.command.as_ref().map(|c| c.split_args()),
        environment: environment
            .into_iter()
            .map(|(name, value)| KeyValuePair { name, value })
            .collect(),
        log_configuration: LogConfiguration::awslogs(app, &region),
        flags,
    };
    let container_name = container.name.clone();

    let task_definition = EcsTaskDefinition {
        name: naming::task_definition(app),
        family: app.to_string(),
        network_mode: "awsvpc".to_string(),
        cpu: aws.ecs_task_cpu.clone(),
        memory: aws.ecs_task_memory.clone(),
        containers: vec![container],
        requires_compatibilities: vec![aws.ecs_launch_type.clone()],
        flags,
    };

    let service = EcsService {
        name: naming::ecs_service(app),
        desired_count: aws.ecs_service_count,
        launch_type: aws.ecs_launch_type.clone(),
        cluster: cluster.name.clone(),
        task_definition: task_definition.name.clone(),
        target_group: target_group.name.clone(),
        target_container_name: container_name,
        target_container_port: config.container_port,
        network_configuration: NetworkConfiguration {
            awsvpc_configuration: AwsVpcConfiguration {
                subnets: aws.subnets.clone(),
                security_groups: aws.security_groups.clone(),
                assign_public_ip: aws.assign_public_ip.then(|| "ENABLED".to_string()),
            },
        },
        force_delete: true,
        force_new_deployment: true,
        flags,
    };

    tracing::debug!(app, region = %region, vpc = %target_group.vpc_id, "built ecs resource graph");

    Ok(AwsResourceGraph {
        name: config.name.clone(),
        enabled: config.enabled,
        ecs_clusters: vec![cluster],
        ecs_task_definitions: vec![task_definition],
        ecs_services: vec![service],
        load_balancers: vec![load_balancer],
        target_groups: vec![target_group],
        listeners: vec![listener],
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
