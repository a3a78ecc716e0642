// SPDX-License-Identifier: Apache-2.0

use crate::{ViolationKind, Violations};

#[test]
fn test_kinds_reported_in_first_trigger_order() {
    let mut violations = Violations::default();
    violations.add(ViolationKind::NicNotFound, Some("eth7".to_string()));
    violations
        .add(ViolationKind::DuplicateInterface, Some("eth0".to_string()));
    violations.add(ViolationKind::NicNotFound, Some("eth8".to_string()));

    assert_eq!(
        violations.report(),
        vec![
            "NIC_NOT_FOUND".to_string(),
            "$NIC_NOT_FOUND_LIST eth7, eth8".to_string(),
            "DUPLICATE_INTERFACE".to_string(),
            "$DUPLICATE_INTERFACE_LIST eth0".to_string(),
        ]
    );
}

#[test]
fn test_entity_less_violation_renders_empty_slot() {
    let mut violations = Violations::default();
    violations.add(ViolationKind::BondInvalidSlaveCount, None);
    violations.add(ViolationKind::BondInvalidSlaveCount, None);

    assert_eq!(
        violations.report(),
        vec![
            "BOND_INVALID_SLAVE_COUNT".to_string(),
            "$BOND_INVALID_SLAVE_COUNT_LIST , ".to_string(),
        ]
    );
}

#[test]
fn test_entities_accumulate_under_one_kind() {
    let mut violations = Violations::default();
    violations
        .add(ViolationKind::NetworkAlreadyAttached, Some("a".to_string()));
    violations
        .add(ViolationKind::NetworkAlreadyAttached, Some("b".to_string()));

    assert!(!violations.is_empty());
    assert!(violations.contains(ViolationKind::NetworkAlreadyAttached));
    assert_eq!(
        violations.entities(ViolationKind::NetworkAlreadyAttached),
        &[Some("a".to_string()), Some("b".to_string())]
    );
    assert_eq!(violations.iter().count(), 1);
}

#[test]
fn test_empty_violations() {
    let violations = Violations::default();
    assert!(violations.is_empty());
    assert!(!violations.contains(ViolationKind::NicNotFound));
    assert!(violations.entities(ViolationKind::NicNotFound).is_empty());
    assert!(violations.report().is_empty());
}

#[test]
fn test_kind_symbolic_names() {
    assert_eq!(
        ViolationKind::DuplicateInterface.to_string(),
        "DUPLICATE_INTERFACE"
    );
    assert_eq!(ViolationKind::NicNotFound.as_str(), "NIC_NOT_FOUND");
    assert_eq!(
        ViolationKind::NetworkAlreadyAttached.as_str(),
        "NETWORK_ALREADY_ATTACHED"
    );
    assert_eq!(
        ViolationKind::NetworkNotInSync.as_str(),
        "NETWORK_NOT_IN_SYNC"
    );
    assert_eq!(
        ViolationKind::NetworkNotRegistered.as_str(),
        "NETWORK_NOT_REGISTERED"
    );
    assert_eq!(
        ViolationKind::BondInvalidSlaveCount.as_str(),
        "BOND_INVALID_SLAVE_COUNT"
    );
}
