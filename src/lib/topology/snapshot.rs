// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ExistingIface, LogicalNetwork, NetsetupError};

/// Read-only collaborator providing the two snapshots the planner diffs
/// against. Implementations normally sit on top of the cluster database;
/// [MemorySource] serves callers that already hold the maps.
pub trait TopologySource {
    /// Interfaces currently present on the host, keyed by interface name,
    /// each enriched with externally computed
    /// [crate::NetworkImplementationDetails].
    fn host_ifaces(
        &self,
        host_id: Uuid,
    ) -> Result<IndexMap<String, ExistingIface>, NetsetupError>;

    /// Logical networks registered for the cluster, keyed by network name.
    fn cluster_networks(
        &self,
        cluster_id: Uuid,
    ) -> Result<IndexMap<String, LogicalNetwork>, NetsetupError>;
}

/// [TopologySource] backed by in-memory maps, ignoring the ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct MemorySource {
    #[serde(default)]
    pub ifaces: IndexMap<String, ExistingIface>,
    #[serde(default)]
    pub networks: IndexMap<String, LogicalNetwork>,
}

impl MemorySource {
    pub fn new(
        ifaces: IndexMap<String, ExistingIface>,
        networks: IndexMap<String, LogicalNetwork>,
    ) -> Self {
        Self { ifaces, networks }
    }
}

impl TopologySource for MemorySource {
    fn host_ifaces(
        &self,
        _host_id: Uuid,
    ) -> Result<IndexMap<String, ExistingIface>, NetsetupError> {
        Ok(self.ifaces.clone())
    }

    fn cluster_networks(
        &self,
        _cluster_id: Uuid,
    ) -> Result<IndexMap<String, LogicalNetwork>, NetsetupError> {
        Ok(self.networks.clone())
    }
}

/// Per-run view of the existing topology. Each snapshot is fetched from
/// the source at most once, on first access, and never refreshed for the
/// rest of the run.
pub(crate) struct TopologySnapshot<'a> {
    source: &'a dyn TopologySource,
    host_id: Uuid,
    cluster_id: Uuid,
    ifaces: Option<IndexMap<String, ExistingIface>>,
    networks: Option<IndexMap<String, LogicalNetwork>>,
}

impl<'a> TopologySnapshot<'a> {
    pub(crate) fn new(
        source: &'a dyn TopologySource,
        host_id: Uuid,
        cluster_id: Uuid,
    ) -> Self {
        Self {
            source,
            host_id,
            cluster_id,
            ifaces: None,
            networks: None,
        }
    }

    pub(crate) fn ifaces(
        &mut self,
    ) -> Result<&IndexMap<String, ExistingIface>, NetsetupError> {
        if self.ifaces.is_none() {
            log::debug!(
                "Fetching existing interfaces of host {}",
                self.host_id
            );
            self.ifaces = Some(self.source.host_ifaces(self.host_id)?);
        }
        Ok(self.ifaces.get_or_insert_with(IndexMap::new))
    }

    pub(crate) fn networks(
        &mut self,
    ) -> Result<&IndexMap<String, LogicalNetwork>, NetsetupError> {
        if self.networks.is_none() {
            log::debug!(
                "Fetching registered networks of cluster {}",
                self.cluster_id
            );
            self.networks =
                Some(self.source.cluster_networks(self.cluster_id)?);
        }
        Ok(self.networks.get_or_insert_with(IndexMap::new))
    }

    pub(crate) fn iface(
        &mut self,
        name: &str,
    ) -> Result<Option<&ExistingIface>, NetsetupError> {
        Ok(self.ifaces()?.get(name))
    }

    pub(crate) fn network(
        &mut self,
        name: &str,
    ) -> Result<Option<&LogicalNetwork>, NetsetupError> {
        Ok(self.networks()?.get(name))
    }

    pub(crate) fn has_network(
        &mut self,
        name: &str,
    ) -> Result<bool, NetsetupError> {
        Ok(self.networks()?.contains_key(name))
    }
}
