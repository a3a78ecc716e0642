// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The closed set of topology problems the planner can detect. Every
/// detectable problem is one of these; none of them aborts the run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ViolationKind {
    /// The same interface name was submitted more than once
    DuplicateInterface,
    /// A submitted interface has no matching NIC on the host
    NicNotFound,
    /// The same logical network was attached to more than one interface
    NetworkAlreadyAttached,
    /// The carrying interface is out of sync and the request changes the
    /// network without asking for a resync
    NetworkNotInSync,
    /// An unmanaged network's placement was changed
    NetworkNotRegistered,
    /// A bond was submitted with fewer than 2 slaves
    BondInvalidSlaveCount,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateInterface => "DUPLICATE_INTERFACE",
            Self::NicNotFound => "NIC_NOT_FOUND",
            Self::NetworkAlreadyAttached => "NETWORK_ALREADY_ATTACHED",
            Self::NetworkNotInSync => "NETWORK_NOT_IN_SYNC",
            Self::NetworkNotRegistered => "NETWORK_NOT_REGISTERED",
            Self::BondInvalidSlaveCount => "BOND_INVALID_SLAVE_COUNT",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accumulated violations of one validation run.
///
/// Kinds are kept in the order they were first triggered and the entities
/// of one kind in the order they were added, so the rendered report is a
/// stable contract rather than hash-map luck. A violation raised without
/// an offending entity occupies an empty slot in its kind's entity list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Violations {
    kinds: IndexMap<ViolationKind, Vec<Option<String>>>,
}

impl Violations {
    pub(crate) fn add(
        &mut self,
        kind: ViolationKind,
        entity: Option<String>,
    ) {
        self.kinds.entry(kind).or_default().push(entity);
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn contains(&self, kind: ViolationKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Entity slots recorded for `kind`, in the order they were added.
    pub fn entities(&self, kind: ViolationKind) -> &[Option<String>] {
        self.kinds.get(&kind).map(|e| e.as_slice()).unwrap_or(&[])
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (ViolationKind, &[Option<String>])> {
        self.kinds.iter().map(|(k, e)| (*k, e.as_slice()))
    }

    /// Flatten into the report handed to the error-translation layer: for
    /// each kind, its symbolic name followed by a `${KIND}_LIST` line
    /// carrying the comma-joined offending entities.
    pub fn report(&self) -> Vec<String> {
        let mut ret = Vec::with_capacity(self.kinds.len() * 2);
        for (kind, entities) in &self.kinds {
            let joined = entities
                .iter()
                .map(|e| e.as_deref().unwrap_or(""))
                .collect::<Vec<&str>>()
                .join(", ");
            ret.push(kind.as_str().to_string());
            ret.push(format!("${}_LIST {}", kind.as_str(), joined));
        }
        ret
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => write!(f, "{s}"),
            Err(e) => write!(f, "failed to serialize to JSON: {e}"),
        }
    }
}
