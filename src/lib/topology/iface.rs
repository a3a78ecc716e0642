// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// How an interface acquires its IP configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum BootProtocol {
    #[default]
    None,
    Dhcp,
    StaticIp,
    /// Catch-all for boot protocols this crate does not understand.
    /// Deserializing an unrecognized value lands here instead of failing,
    /// so a malformed request surfaces as a configuration difference
    /// rather than a crash.
    #[serde(other)]
    Unknown,
}

/// A single interface definition as submitted in a setup request: a plain
/// NIC, a VLAN device, a bond master or a bond slave.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct HostIface {
    pub name: String,
    /// Whether this entry defines a bond master.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_bond: bool,
    /// Name of the bond this interface is enslaved to, when it is a slave.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bond_name: Option<String>,
    /// Opaque bonding option string. Never parsed, only compared for
    /// equality; `None` and `Some("")` are distinct values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bond_options: Option<String>,
    /// Logical network this interface should carry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    #[serde(default)]
    pub boot_protocol: BootProtocol,
    /// Only meaningful when `boot_protocol` is `StaticIp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
}

impl HostIface {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Whether the network-facing configuration of this definition differs
    /// from `existing`: network name, boot protocol, or (for static boot
    /// protocol) any of address/gateway/subnet.
    pub(crate) fn net_config_differs(&self, existing: &Self) -> bool {
        self.network_name != existing.network_name
            || self.boot_protocol != existing.boot_protocol
            || self.static_boot_config_differs(existing)
    }

    fn static_boot_config_differs(&self, existing: &Self) -> bool {
        self.boot_protocol == BootProtocol::StaticIp
            && (self.address != existing.address
                || self.gateway != existing.gateway
                || self.subnet != existing.subnet)
    }
}

/// The externally computed relation between an interface's live
/// configuration and the declared configuration of the logical network it
/// carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct NetworkImplementationDetails {
    pub in_sync: bool,
}

/// An interface as currently present on the host, enriched with
/// [NetworkImplementationDetails] by the collaborator that fetched it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct ExistingIface {
    #[serde(flatten)]
    pub iface: HostIface,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_details: Option<NetworkImplementationDetails>,
}

impl ExistingIface {
    pub fn name(&self) -> &str {
        self.iface.name.as_str()
    }

    /// An interface is only treated as out of sync when its details were
    /// actually computed and say so. Missing details mean "unknown", which
    /// never blocks a request.
    pub fn is_out_of_sync(&self) -> bool {
        self.implementation_details
            .map(|d| !d.in_sync)
            .unwrap_or(false)
    }
}

impl From<HostIface> for ExistingIface {
    fn from(iface: HostIface) -> Self {
        Self {
            iface,
            implementation_details: None,
        }
    }
}

/// Strip a VLAN suffix from an interface name: `eth2.100` is the VLAN 100
/// device on top of the `eth2` NIC, and it is `eth2` that must exist on
/// the host.
pub(crate) fn strip_vlan_suffix(name: &str) -> &str {
    name.split_once('.').map_or(name, |(base, _)| base)
}

/// Java-style blank check: `None`, empty and whitespace-only strings all
/// count as "no value".
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn is_false(d: &bool) -> bool {
    !*d
}
