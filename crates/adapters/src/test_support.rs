// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test fakes for the builder collaborators.

use crate::aws::{LookupError, SubnetResolver};
use indexmap::IndexMap;
use parking_lot::Mutex;

pub use sw_core::test_support::FakeSecretStore;

/// In-memory subnet → VPC table. Unknown subnets fail with `NotFound`.
#[derive(Debug, Default)]
pub struct FakeSubnetResolver {
    vpcs: IndexMap<String, String>,
    unavailable: bool,
    lookups: Mutex<Vec<(String, String)>>,
}

impl FakeSubnetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subnet(mut self, subnet: &str, vpc: &str) -> Self {
        self.vpcs.insert(subnet.to_string(), vpc.to_string());
        self
    }

    /// Every lookup fails as if the EC2 API were unreachable.
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    /// `(subnet, region)` pairs looked up so far.
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().clone()
    }
}

impl SubnetResolver for FakeSubnetResolver {
    fn vpc_id(&self, subnet: &str, region: &str) -> Result<String, LookupError> {
        self.lookups.lock().push((subnet.to_string(), region.to_string()));
        if self.unavailable {
            return Err(LookupError::Unavailable("fake ec2 is down".to_string()));
        }
        self.vpcs.get(subnet).cloned().ok_or_else(|| LookupError::NotFound(subnet.to_string()))
    }
}
