// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading app configs from disk.

use crate::prelude::*;
use similar_asserts::assert_eq;

/// The same app written in each supported format loads to the same config
#[test]
fn formats_are_interchangeable() {
    let temp = Project::empty();
    let from_toml = temp.config(
        "api.toml",
        r#"
name = "api"
image_name = "acme/api"
image_tag = "2.1.0"
open_container_port = true

[workspace]
root = "{root}"
mount = true

[k8s]
replicas = 3
"#,
    );
    let from_json = temp.config(
        "api.json",
        r#"{
  "name": "api",
  "image_name": "acme/api",
  "image_tag": "2.1.0",
  "open_container_port": true,
  "workspace": {"root": "{root}", "mount": true},
  "k8s": {"replicas": 3}
}"#,
    );
    let from_hcl = temp.config(
        "api.hcl",
        r#"
name = "api"
image_name = "acme/api"
image_tag = "2.1.0"
open_container_port = true

workspace {
  root = "{root}"
  mount = true
}

k8s {
  replicas = 3
}
"#,
    );

    assert_eq!(from_toml, from_json);
    assert_eq!(from_toml, from_hcl);
    assert_eq!(from_toml.image_str(), "acme/api:2.1.0");
}

/// Typos in option names are reported instead of ignored
#[test]
fn unknown_options_fail_to_load() {
    let temp = Project::empty();
    temp.file("api.toml", "name = \"api\"\nreplica = 2\n");
    let err = temp.load("api.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err}");
    assert!(err.to_string().contains("replica"), "{err}");
}

/// Validation runs on load and names the offending option
#[test]
fn invalid_values_name_the_option() {
    let temp = Project::empty();
    temp.file("api.toml", "name = \"api\"\n\n[aws]\necs_launch_type = \"LAMBDA\"\n");
    let err = temp.load("api.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "aws.ecs_launch_type", .. }), "{err}");
}

/// A git-sync sidecar needs a repository
#[test]
fn git_sync_without_repo_fails_to_load() {
    let temp = Project::empty();
    temp.file(
        "api.toml",
        r#"
name = "api"

[workspace.git_sync]
create_sidecar = true
"#,
    );
    let err = temp.load("api.toml").unwrap_err();
    assert!(matches!(err, ConfigError::MissingGitSyncRepo), "{err}");
}
