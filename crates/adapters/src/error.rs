// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sw_core::{ContextMismatch, EnvError, MountError, PathError};
use thiserror::Error;

/// Errors from building a resource graph.
///
/// Hard errors are user mistakes that must surface; the rest are reported by
/// [`crate::graph::build`] as an absent graph.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid workspace mount: {0}")]
    Mount(#[from] MountError),

    #[error(transparent)]
    ContextMismatch(#[from] ContextMismatch),

    #[error("could not resolve {what}: {reason}")]
    Resolution { what: &'static str, reason: String },

    #[error("could not compose container env: {0}")]
    Env(#[from] EnvError),

    #[error("could not look up subnet {subnet}: {reason}")]
    SubnetLookup { subnet: String, reason: String },

    #[error("subnets span multiple VPCs: {}", vpcs.join(", "))]
    MultiVpc { vpcs: Vec<String> },
}

impl BuildError {
    /// Whether the error must fail the caller instead of yielding no graph.
    pub fn is_hard(&self) -> bool {
        matches!(self, BuildError::Config(_) | BuildError::Mount(_) | BuildError::MultiVpc { .. })
    }
}

impl From<PathError> for BuildError {
    fn from(e: PathError) -> Self {
        BuildError::Resolution { what: "container paths", reason: e.to_string() }
    }
}
