// SPDX-License-Identifier: Apache-2.0

mod iface;
mod violation;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    ExistingIface, HostIface, LogicalNetwork, MemorySource, SetupOutcome,
    SetupPlanner, SetupRequest, TopologySource,
};

pub(crate) fn ifaces_from_yaml(yaml: &str) -> Vec<HostIface> {
    serde_yaml::from_str(yaml).unwrap()
}

pub(crate) fn existing_from_yaml(
    yaml: &str,
) -> IndexMap<String, ExistingIface> {
    let ifaces: Vec<ExistingIface> = serde_yaml::from_str(yaml).unwrap();
    ifaces
        .into_iter()
        .map(|i| (i.iface.name.clone(), i))
        .collect()
}

pub(crate) fn networks(names: &[&str]) -> IndexMap<String, LogicalNetwork> {
    names
        .iter()
        .map(|n| (n.to_string(), LogicalNetwork::new(n)))
        .collect()
}

pub(crate) fn source(
    existing_yaml: &str,
    network_names: &[&str],
) -> MemorySource {
    MemorySource::new(existing_from_yaml(existing_yaml), networks(network_names))
}

pub(crate) fn run(
    request: &SetupRequest,
    source: &dyn TopologySource,
) -> SetupOutcome {
    SetupPlanner::new(request, source, Uuid::nil(), Uuid::nil())
        .validate()
        .unwrap()
}

pub(crate) fn run_ifaces(
    desired_yaml: &str,
    source: &dyn TopologySource,
) -> SetupOutcome {
    let request = SetupRequest::new(ifaces_from_yaml(desired_yaml));
    run(&request, source)
}
