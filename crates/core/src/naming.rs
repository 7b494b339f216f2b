// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default resource names, all prefixed with the app name.

pub fn container(app: &str) -> String {
    format!("{}-container", app)
}

pub fn deployment(app: &str) -> String {
    format!("{}-deploy", app)
}

pub fn pod(app: &str) -> String {
    format!("{}-pod", app)
}

pub fn configmap(app: &str) -> String {
    format!("{}-cm", app)
}

pub fn secret(app: &str) -> String {
    format!("{}-secret", app)
}

pub fn service(app: &str) -> String {
    format!("{}-svc", app)
}

pub fn service_account(app: &str) -> String {
    format!("{}-sa", app)
}

pub fn cluster_role(app: &str) -> String {
    format!("{}-cr", app)
}

pub fn cluster_role_binding(app: &str) -> String {
    format!("{}-crb", app)
}

/// Workspace volume: `{app}-{workspace}-ws`.
pub fn workspace_volume(app: &str, workspace_name: &str) -> String {
    format!("{}-{}-ws", app, workspace_name)
}

pub fn ecs_cluster(app: &str) -> String {
    format!("{}-cluster", app)
}

pub fn load_balancer(app: &str) -> String {
    format!("{}-lb", app)
}

pub fn target_group(app: &str) -> String {
    format!("{}-tg", app)
}

pub fn listener(app: &str) -> String {
    format!("{}-listener", app)
}

pub fn task_definition(app: &str) -> String {
    format!("{}-td", app)
}

pub fn ecs_service(app: &str) -> String {
    format!("{}-service", app)
}
