// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a logical network registered for the cluster.
///
/// Presence of a network's name in the cluster snapshot is what makes it
/// *managed*; a network name attached to a host interface without a
/// matching entry (typically an ad-hoc VLAN) is unmanaged. The actual
/// network configuration is owned by the cluster registry, the name is
/// just the key the desired state refers to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct LogicalNetwork {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u64>,
}

impl LogicalNetwork {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
