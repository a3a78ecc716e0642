// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::HostIface;

/// A caller-submitted description of the topology a host should end up
/// with: the full desired interface list plus the names of networks the
/// operator explicitly asked to force back into sync.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct SetupRequest {
    pub ifaces: Vec<HostIface>,
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub networks_to_sync: IndexSet<String>,
}

impl SetupRequest {
    pub fn new(ifaces: Vec<HostIface>) -> Self {
        Self {
            ifaces,
            networks_to_sync: IndexSet::new(),
        }
    }

    pub(crate) fn should_sync(&self, network_name: &str) -> bool {
        self.networks_to_sync.contains(network_name)
    }
}
