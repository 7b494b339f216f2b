// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::meta;
use indexmap::IndexMap;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use sw_core::{naming, AppConfig, PortSpec, TargetPort};

fn service_port(port: &PortSpec) -> ServicePort {
    let target_port = match (&port.target_port, &port.name) {
        (Some(TargetPort::Number(n)), _) => IntOrString::Int(*n),
        (Some(TargetPort::Name(name)), _) | (None, Some(name)) => IntOrString::String(name.clone()),
        (None, None) => IntOrString::Int(i32::from(port.container_port)),
    };
    ServicePort {
        name: port.name.clone(),
        port: i32::from(port.service_port.unwrap_or(port.container_port)),
        target_port: Some(target_port),
        node_port: port.node_port.map(i32::from),
        protocol: port.protocol.clone(),
        ..Default::default()
    }
}

/// Service exposing `ports` (plus `service_ports`) of the deployment's pods.
pub(super) fn service(
    config: &AppConfig,
    namespace: &str,
    common_labels: &IndexMap<String, String>,
    deployment: &Deployment,
    ports: &[PortSpec],
) -> Service {
    let k8s = &config.k8s;
    let app = config.name.as_str();
    let name = k8s.service_name.clone().unwrap_or_else(|| naming::service(app));

    // Select exactly the pods the deployment manages.
    let selector = deployment.spec.as_ref().and_then(|spec| spec.selector.match_labels.clone());

    let service_ports: Vec<ServicePort> =
        ports.iter().chain(k8s.service_ports.iter()).map(service_port).collect();

    let mut metadata = meta(&name, Some(namespace), app, &[common_labels, &k8s.service_labels]);
    if !k8s.service_annotations.is_empty() {
        metadata.annotations =
            Some(k8s.service_annotations.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
    }

    Service {
        metadata,
        spec: Some(ServiceSpec {
            type_: k8s.service_type.map(|t| t.to_string()),
            ports: if service_ports.is_empty() { None } else { Some(service_ports) },
            selector,
            health_check_node_port: k8s.service_health_check_node_port,
            internal_traffic_policy: k8s.service_internal_traffic_policy.clone(),
            load_balancer_class: k8s.service_load_balancer_class.clone(),
            load_balancer_ip: k8s.service_load_balancer_ip.clone(),
            load_balancer_source_ranges: k8s.service_load_balancer_source_ranges.clone(),
            allocate_load_balancer_node_ports: k8s.service_allocate_load_balancer_node_ports,
            ..Default::default()
        }),
        ..Default::default()
    }
}
