// SPDX-License-Identifier: Apache-2.0

use indexmap::{IndexMap, IndexSet};
use uuid::Uuid;

use super::iface::{non_blank, strip_vlan_suffix};
use super::snapshot::TopologySnapshot;
use crate::{
    HostIface, NetsetupError, SetupOutcome, SetupPlan, SetupRequest,
    TopologySource, ViolationKind, Violations,
};

/// One-shot validation and planning engine for a host topology change.
///
/// A planner performs a single pass over the submitted interface list,
/// classifying every entry as bond master, bond slave or plain NIC while
/// raising [crate::Violations] for topology errors, then runs the
/// set-level checks that need the whole picture (bond slave counts,
/// removed networks, removed bonds, slave membership changes). The plan
/// and the violations come out of the same pass, so they never disagree
/// about what the request meant.
///
/// The planner holds no state across runs; the existing topology is
/// fetched from the [TopologySource] at most once per run, on first
/// access.
pub struct SetupPlanner<'a> {
    request: &'a SetupRequest,
    snapshot: TopologySnapshot<'a>,
    /// All interface names processed so far in this run.
    seen_iface_names: IndexSet<String>,
    /// Bond name to the slaves collected for it from the desired input.
    bonds: IndexMap<String, Vec<HostIface>>,
    /// All network names claimed by some interface in this run.
    attached_networks: IndexSet<String>,
    violations: Violations,
    plan: SetupPlan,
}

impl<'a> SetupPlanner<'a> {
    pub fn new(
        request: &'a SetupRequest,
        source: &'a dyn TopologySource,
        host_id: Uuid,
        cluster_id: Uuid,
    ) -> Self {
        Self {
            request,
            snapshot: TopologySnapshot::new(source, host_id, cluster_id),
            seen_iface_names: IndexSet::new(),
            bonds: IndexMap::new(),
            attached_networks: IndexSet::new(),
            violations: Violations::default(),
            plan: SetupPlan::default(),
        }
    }

    /// Validate the request and compute the change plan in one pass.
    ///
    /// The `Err` arm is reserved for snapshot fetch failures surfaced by
    /// the [TopologySource]; every topology problem ends up as a
    /// violation inside the [SetupOutcome], and the pass always runs to
    /// completion.
    pub fn validate(mut self) -> Result<SetupOutcome, NetsetupError> {
        let request = self.request;
        log::debug!(
            "Validating desired topology of {} interface(s)",
            request.ifaces.len()
        );

        for iface in &request.ifaces {
            if !self.mark_processed(iface) {
                continue;
            }
            if iface.is_bond {
                self.collect_bond_if_modified(iface)?;
            } else {
                if let Some(bond_name) = non_blank(&iface.bond_name) {
                    self.collect_bond_slave(bond_name, iface);
                }

                // The NIC must exist on the host, ignoring any VLAN
                // suffix of the submitted name.
                let nic_name = strip_vlan_suffix(iface.name.as_str());
                if self.snapshot.iface(nic_name)?.is_none() {
                    self.violations.add(
                        ViolationKind::NicNotFound,
                        Some(nic_name.to_string()),
                    );
                }
            }

            // Network extraction stops for the rest of the run once any
            // violation was raised; the plan computed alongside a
            // violation report must not claim networks past the first
            // error.
            if self.violations.is_empty() {
                if let Some(network_name) = non_blank(&iface.network_name) {
                    self.extract_network(iface, network_name)?;
                }
            }
        }

        self.check_bond_slave_counts();
        self.collect_removed_networks()?;
        self.collect_removed_bonds()?;
        self.detect_slave_changes()?;

        Ok(SetupOutcome {
            plan: self.plan,
            violations: self.violations,
        })
    }

    /// Record the interface name as processed, raising a violation and
    /// refusing the entry when the name was already seen in this run.
    fn mark_processed(&mut self, iface: &HostIface) -> bool {
        if self.seen_iface_names.contains(iface.name.as_str()) {
            self.violations.add(
                ViolationKind::DuplicateInterface,
                Some(iface.name.clone()),
            );
            return false;
        }
        self.seen_iface_names.insert(iface.name.clone());
        true
    }

    /// Register a submitted bond master, queueing it in the plan when it
    /// is new on the host or its bonding options changed.
    fn collect_bond_if_modified(
        &mut self,
        bond: &HostIface,
    ) -> Result<(), NetsetupError> {
        if !self.bonds.contains_key(bond.name.as_str()) {
            self.bonds.insert(bond.name.clone(), Vec::new());
        }

        // A bond absent from the host counts as modified; otherwise only
        // the opaque options string decides.
        let modified = match self.snapshot.iface(bond.name.as_str())? {
            None => true,
            Some(existing) => bond.bond_options != existing.iface.bond_options,
        };
        if modified {
            self.plan
                .modified_bonds
                .insert(bond.name.clone(), Some(bond.clone()));
        }
        Ok(())
    }

    /// Slave membership is discovered from the slave side; the bond
    /// master entry may appear anywhere in the input, or not at all.
    fn collect_bond_slave(&mut self, bond_name: &str, slave: &HostIface) {
        self.bonds
            .entry(bond_name.to_string())
            .or_default()
            .push(slave.clone());
    }

    /// Claim `network_name` for `iface` and decide what that means:
    /// a violation, an entry in `modified_networks`, or nothing.
    fn extract_network(
        &mut self,
        iface: &HostIface,
        network_name: &str,
    ) -> Result<(), NetsetupError> {
        // A logical network can be attached to at most one interface.
        if self.attached_networks.contains(network_name) {
            self.violations.add(
                ViolationKind::NetworkAlreadyAttached,
                Some(network_name.to_string()),
            );
            return Ok(());
        }
        self.attached_networks.insert(network_name.to_string());

        if self.snapshot.has_network(network_name)? {
            // Locate the existing interface currently carrying this
            // network: the same-named interface first, otherwise whichever
            // interface the network sits on right now.
            let carrier_out_of_sync = {
                let ifaces = self.snapshot.ifaces()?;
                let mut carrier = ifaces.get(iface.name.as_str());
                if let Some(existing) = carrier {
                    if existing.iface.network_name.as_deref()
                        != Some(network_name)
                    {
                        carrier = ifaces.values().find(|e| {
                            e.iface.network_name.as_deref()
                                == Some(network_name)
                        });
                    }
                }
                carrier.map(|e| e.is_out_of_sync()).unwrap_or(false)
            };

            if carrier_out_of_sync {
                if self.request.should_sync(network_name) {
                    self.queue_modified_network(network_name)?;
                } else if self.net_config_modified(iface)? {
                    self.violations.add(
                        ViolationKind::NetworkNotInSync,
                        Some(network_name.to_string()),
                    );
                }
            } else if self.net_config_modified(iface)? {
                self.queue_modified_network(network_name)?;
            }
        } else if self.unmanaged_network_changed(iface, network_name)? {
            self.violations.add(ViolationKind::NetworkNotRegistered, None);
        }
        Ok(())
    }

    fn queue_modified_network(
        &mut self,
        network_name: &str,
    ) -> Result<(), NetsetupError> {
        if let Some(network) = self.snapshot.network(network_name)? {
            self.plan.modified_networks.push(network.clone());
        } else {
            log::warn!(
                "BUG: queue_modified_network() called for network {network_name} \
                 missing from the cluster snapshot"
            );
        }
        Ok(())
    }

    /// Whether the submitted network-facing configuration differs from
    /// what the same-named interface on the host has now. An interface
    /// with no existing counterpart always counts as modified.
    fn net_config_modified(
        &mut self,
        iface: &HostIface,
    ) -> Result<bool, NetsetupError> {
        Ok(match self.snapshot.iface(iface.name.as_str())? {
            None => true,
            Some(existing) => iface.net_config_differs(&existing.iface),
        })
    }

    /// An unmanaged network changed when it has no existing interface of
    /// this name (an ad-hoc VLAN moved to a different interface), or the
    /// network name on the existing interface differs. Either way the
    /// request is touching something the cluster does not manage.
    fn unmanaged_network_changed(
        &mut self,
        iface: &HostIface,
        network_name: &str,
    ) -> Result<bool, NetsetupError> {
        Ok(match self.snapshot.iface(iface.name.as_str())? {
            None => true,
            Some(existing) => {
                existing.iface.network_name.as_deref() != Some(network_name)
            }
        })
    }

    /// A bond needs at least 2 slaves. The bond stays in the collected
    /// maps regardless; the violation does not abort the remaining
    /// checks.
    fn check_bond_slave_counts(&mut self) {
        for (bond_name, slaves) in &self.bonds {
            if slaves.len() < 2 {
                log::debug!(
                    "Bond {bond_name} submitted with {} slave(s)",
                    slaves.len()
                );
                self.violations
                    .add(ViolationKind::BondInvalidSlaveCount, None);
            }
        }
    }

    /// A network carried by an existing interface and no longer claimed
    /// by this run is to be torn down.
    fn collect_removed_networks(&mut self) -> Result<(), NetsetupError> {
        let attached = &self.attached_networks;
        for existing in self.snapshot.ifaces()?.values() {
            if let Some(network_name) =
                non_blank(&existing.iface.network_name)
            {
                if !attached.contains(network_name) {
                    self.plan
                        .removed_networks
                        .push(network_name.to_string());
                }
            }
        }
        Ok(())
    }

    /// A bond that had slaves on the host but collected none in this run
    /// is to be removed. A bond that never had slaves needs no touching
    /// either way.
    fn collect_removed_bonds(&mut self) -> Result<(), NetsetupError> {
        let bonds = &self.bonds;
        for existing in self.snapshot.ifaces()?.values() {
            if let Some(bond_name) = non_blank(&existing.iface.bond_name) {
                if !bonds.contains_key(bond_name) {
                    self.plan.removed_bonds.insert(bond_name.to_string());
                }
            }
        }
        Ok(())
    }

    /// Detect plain NICs whose bond membership changed, pulling the
    /// affected bonds' existing definitions into the plan so their slave
    /// sets get reapplied. Bonds removed entirely are left alone.
    fn detect_slave_changes(&mut self) -> Result<(), NetsetupError> {
        let request = self.request;
        for iface in &request.ifaces {
            let old_bond_name = match self.snapshot.iface(iface.name.as_str())? {
                Some(existing)
                    if !existing.iface.is_bond
                        && existing.iface.vlan_id.is_none() =>
                {
                    existing.iface.bond_name.clone()
                }
                _ => continue,
            };
            let new_bond_name = iface.bond_name.clone();
            if new_bond_name == old_bond_name {
                continue;
            }

            if let Some(new_bond) = new_bond_name.as_deref() {
                if !self.plan.modified_bonds.contains_key(new_bond) {
                    let existing_def = self
                        .snapshot
                        .iface(new_bond)?
                        .map(|e| e.iface.clone());
                    self.plan
                        .modified_bonds
                        .insert(new_bond.to_string(), existing_def);
                }
            }

            if let Some(old_bond) = old_bond_name.as_deref() {
                // The registration guard looks up the *new* bond's key,
                // so an old bond losing a slave to another live bond is
                // never re-registered here. Kept as the engine has always
                // behaved; see DESIGN.md.
                let already_registered = match new_bond_name.as_deref() {
                    Some(new_bond) => {
                        self.plan.modified_bonds.contains_key(new_bond)
                    }
                    None => false,
                };
                if !already_registered
                    && !self.plan.removed_bonds.contains(old_bond)
                {
                    let existing_def = self
                        .snapshot
                        .iface(old_bond)?
                        .map(|e| e.iface.clone());
                    self.plan
                        .modified_bonds
                        .insert(old_bond.to_string(), existing_def);
                }
            }
        }
        Ok(())
    }
}
