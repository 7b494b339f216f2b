// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subnet to VPC resolution.

use crate::BuildError;
use indexmap::IndexSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("subnet not found: {0}")]
    NotFound(String),

    #[error("subnet lookup unavailable: {0}")]
    Unavailable(String),
}

/// Looks up the VPC a subnet belongs to, e.g. through the EC2 API.
pub trait SubnetResolver: Send + Sync {
    fn vpc_id(&self, subnet: &str, region: &str) -> Result<String, LookupError>;
}

/// The single VPC shared by every subnet.
pub(super) fn single_vpc(
    subnets: &[String],
    region: &str,
    resolver: &dyn SubnetResolver,
) -> Result<String, BuildError> {
    if subnets.is_empty() {
        return Err(BuildError::Config(
            "aws.subnets must list at least one subnet for the load balancer".to_string(),
        ));
    }

    let mut vpcs: IndexSet<String> = IndexSet::new();
    for subnet in subnets {
        let vpc = resolver.vpc_id(subnet, region).map_err(|e| BuildError::SubnetLookup {
            subnet: subnet.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(subnet = %subnet, vpc = %vpc, "resolved subnet vpc");
        vpcs.insert(vpc);
    }

    if vpcs.len() > 1 {
        return Err(BuildError::MultiVpc { vpcs: vpcs.into_iter().collect() });
    }
    vpcs.pop().ok_or_else(|| BuildError::Config("aws.subnets resolved to no VPC".to_string()))
}

#[cfg(test)]
#[path = "vpc_tests.rs"]
mod tests;
