// SPDX-License-Identifier: Apache-2.0

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{HostIface, LogicalNetwork, Violations};

/// The change set required to take a host from its existing topology to
/// the desired one. Orchestration applies it; this crate only computes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct SetupPlan {
    /// Cluster networks whose attachment or configuration must be
    /// (re)applied, in the order they were discovered.
    pub modified_networks: Vec<LogicalNetwork>,
    /// Network names no longer attached to any interface.
    pub removed_networks: Vec<String>,
    /// Bond name to the definition that should now represent the bond:
    /// the newly submitted one, or the prior existing definition for a
    /// bond dragged in by slave membership changes. `None` when the bond
    /// is referenced through slaves only and has no definition on the
    /// host yet.
    pub modified_bonds: IndexMap<String, Option<HostIface>>,
    /// Bond names that no longer have any slaves.
    pub removed_bonds: IndexSet<String>,
}

impl SetupPlan {
    /// The modified bond definitions as a flat list, skipping bonds whose
    /// definition is not known yet.
    pub fn modified_bond_ifaces(&self) -> Vec<&HostIface> {
        self.modified_bonds.values().flatten().collect()
    }

    pub fn is_noop(&self) -> bool {
        self.modified_networks.is_empty()
            && self.removed_networks.is_empty()
            && self.modified_bonds.is_empty()
            && self.removed_bonds.is_empty()
    }
}

impl std::fmt::Display for SetupPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => write!(f, "{s}"),
            Err(e) => write!(f, "failed to serialize to JSON: {e}"),
        }
    }
}

/// Everything one validation run produced: the partial plan and the
/// violations found on the way. Callers decide whether any violation
/// blocks applying the plan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct SetupOutcome {
    pub plan: SetupPlan,
    pub violations: Violations,
}

impl SetupOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The flat violation report, see [Violations::report].
    pub fn report(&self) -> Vec<String> {
        self.violations.report()
    }
}
