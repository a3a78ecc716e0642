// SPDX-License-Identifier: Apache-2.0

mod iface;
mod network;
mod plan;
mod planner;
mod request;
mod snapshot;
mod violation;

pub use self::iface::{
    BootProtocol, ExistingIface, HostIface, NetworkImplementationDetails,
};
pub use self::network::LogicalNetwork;
pub use self::plan::{SetupOutcome, SetupPlan};
pub use self::planner::SetupPlanner;
pub use self::request::SetupRequest;
pub use self::snapshot::{MemorySource, TopologySource};
pub use self::violation::{ViolationKind, Violations};

#[cfg(test)]
mod unit_tests;
