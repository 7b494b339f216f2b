// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ECS and ELB resource descriptors.
//!
//! Cross-resource references are by descriptor name; the lifecycle manager
//! resolves them to ARNs when it materializes the graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sw_core::ResourceFlags;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    pub name: String,
    pub port: u16,
    pub protocol: String,
    pub vpc_id: String,
    pub target_type: String,
    pub flags: ResourceFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    pub name: String,
    pub protocol: String,
    pub port: u16,
    pub load_balancer: String,
    pub target_group: String,
    pub flags: ResourceFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: u16,
}

/// One `{"name": ..., "value": ...}` entry of a container environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    pub log_driver: String,
    pub options: IndexMap<String, String>,
}

impl LogConfiguration {
    /// CloudWatch logs under a group and stream prefix named after the app.
    pub fn awslogs(app: &str, region: &str) -> Self {
        let options = [
            ("awslogs-group", app),
            ("awslogs-region", region),
            ("awslogs-create-group", "true"),
            ("awslogs-stream-prefix", app),
        ];
        Self {
            log_driver: "awslogs".to_string(),
            options: options.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcsContainer {
    pub name: String,
    pub image: String,
    pub port_mappings: Vec<PortMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    pub environment: Vec<KeyValuePair>,
    pub log_configuration: LogConfiguration,
    pub flags: ResourceFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcsTaskDefinition {
    pub name: String,
    pub family: String,
    pub network_mode: String,
    pub cpu: String,
    pub memory: String,
    pub containers: Vec<EcsContainer>,
    pub requires_compatibilities: Vec<String>,
    pub flags: ResourceFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsVpcConfiguration {
    pub subnets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
    /// `ENABLED` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign_public_ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfiguration {
    #[serde(rename = "awsvpcConfiguration")]
    pub awsvpc_configuration: AwsVpcConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcsService {
    pub name: String,
    pub desired_count: u32,
    pub launch_type: String,
    pub cluster: String,
    pub task_definition: String,
    pub target_group: String,
    pub target_container_name: String,
    pub target_container_port: u16,
    pub network_configuration: NetworkConfiguration,
    pub force_delete: bool,
    pub force_new_deployment: bool,
    pub flags: ResourceFlags,
}
