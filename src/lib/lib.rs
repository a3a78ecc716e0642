// SPDX-License-Identifier: Apache-2.0

mod error;
mod topology;

pub use self::error::{ErrorKind, NetsetupError};
pub use self::topology::{
    BootProtocol, ExistingIface, HostIface, LogicalNetwork, MemorySource,
    NetworkImplementationDetails, SetupOutcome, SetupPlan, SetupPlanner,
    SetupRequest, TopologySource, ViolationKind, Violations,
};
