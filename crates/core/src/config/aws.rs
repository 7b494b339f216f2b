// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AWS (ECS + ELB) configuration.

use super::{ConfigError, ResourceFlags};
use serde::{Deserialize, Serialize};

/// An ECS cluster descriptor. Supply one in config to reuse an existing cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcsCluster {
    pub name: String,
    pub ecs_cluster_name: String,
    #[serde(default)]
    pub capacity_providers: Vec<String>,
    #[serde(default)]
    pub flags: ResourceFlags,
}

/// An application load balancer descriptor. Supply one in config to reuse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadBalancer {
    pub name: String,
    #[serde(default)]
    pub subnets: Vec<String>,
    #[serde(default)]
    pub security_groups: Vec<String>,
    #[serde(default)]
    pub flags: ResourceFlags,
}

/// Options that only affect the ECS graph (plus the AWS env variables).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AwsConfig {
    /// Wins over the build context's region.
    pub region: Option<String>,
    pub profile: Option<String>,
    pub config_file: Option<String>,
    pub shared_credentials_file: Option<String>,

    pub ecs_cluster: Option<EcsCluster>,
    /// `FARGATE`, `EC2` or `EXTERNAL`.
    pub ecs_launch_type: String,
    pub ecs_task_cpu: String,
    pub ecs_task_memory: String,
    pub ecs_service_count: u32,
    pub assign_public_ip: bool,
    pub elb: Option<LoadBalancer>,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            config_file: None,
            shared_credentials_file: None,
            ecs_cluster: None,
            ecs_launch_type: "FARGATE".to_string(),
            ecs_task_cpu: "256".to_string(),
            ecs_task_memory: "512".to_string(),
            ecs_service_count: 1,
            assign_public_ip: true,
            elb: None,
            subnets: Vec::new(),
            security_groups: Vec::new(),
        }
    }
}

const LAUNCH_TYPES: &[&str] = &["FARGATE", "EC2", "EXTERNAL"];

impl AwsConfig {
    crate::setters! {
        into {
            ecs_launch_type: String,
            ecs_task_cpu: String,
            ecs_task_memory: String,
        }
        set {
            ecs_service_count: u32,
            assign_public_ip: bool,
            subnets: Vec<String>,
            security_groups: Vec<String>,
        }
        option {
            region: String,
            profile: String,
            config_file: String,
            shared_credentials_file: String,
            ecs_cluster: EcsCluster,
            elb: LoadBalancer,
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if !LAUNCH_TYPES.contains(&self.ecs_launch_type.as_str()) {
            return Err(ConfigError::Invalid {
                field: "aws.ecs_launch_type",
                reason: format!("expected one of {:?}, got {:?}", LAUNCH_TYPES, self.ecs_launch_type),
            });
        }
        for (field, value, unit) in [
            ("aws.ecs_task_cpu", &self.ecs_task_cpu, "vCPU"),
            ("aws.ecs_task_memory", &self.ecs_task_memory, "GB"),
        ] {
            if !is_task_size(value, unit) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a number or \"<n> {}\", got {:?}", unit, value),
                });
            }
        }
        Ok(())
    }
}

/// ECS task sizes: bare units (`"512"`) or a decimal amount with a unit
/// suffix (`"0.5 vCPU"`, `"2 GB"`).
fn is_task_size(value: &str, unit: &str) -> bool {
    if value.parse::<u32>().is_ok() {
        return true;
    }
    match value.trim().rsplit_once(' ') {
        Some((amount, suffix)) => {
            suffix.eq_ignore_ascii_case(unit)
                && amount.trim().parse::<f64>().is_ok_and(|n| n.is_finite() && n > 0.0)
        }
        None => false,
    }
}
