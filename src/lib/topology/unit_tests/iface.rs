// SPDX-License-Identifier: Apache-2.0

use crate::{BootProtocol, ExistingIface, HostIface};

#[test]
fn test_iface_from_yaml() {
    let iface: HostIface = serde_yaml::from_str(
        r#"
name: bond0.100
bond-options: mode=4 miimon=100
network-name: storage
boot-protocol: static-ip
address: 192.0.2.10
subnet: 255.255.255.0
gateway: 192.0.2.1
vlan-id: 100
"#,
    )
    .unwrap();

    assert_eq!(iface.name, "bond0.100");
    assert!(!iface.is_bond);
    assert_eq!(iface.bond_options.as_deref(), Some("mode=4 miimon=100"));
    assert_eq!(iface.network_name.as_deref(), Some("storage"));
    assert_eq!(iface.boot_protocol, BootProtocol::StaticIp);
    assert_eq!(iface.vlan_id, Some(100));
}

#[test]
fn test_boot_protocol_defaults_to_none() {
    let iface: HostIface = serde_yaml::from_str("name: eth0").unwrap();
    assert_eq!(iface.boot_protocol, BootProtocol::None);
}

#[test]
fn test_unrecognized_boot_protocol_is_not_a_crash() {
    let iface: HostIface = serde_yaml::from_str(
        r#"
name: eth0
boot-protocol: bootp
"#,
    )
    .unwrap();
    assert_eq!(iface.boot_protocol, BootProtocol::Unknown);
}

#[test]
fn test_existing_iface_flattens_base_fields() {
    let existing: ExistingIface = serde_yaml::from_str(
        r#"
name: eth0
network-name: mgmt
boot-protocol: dhcp
implementation-details:
  in-sync: false
"#,
    )
    .unwrap();

    assert_eq!(existing.name(), "eth0");
    assert_eq!(existing.iface.network_name.as_deref(), Some("mgmt"));
    assert!(existing.is_out_of_sync());
}

#[test]
fn test_missing_implementation_details_mean_in_sync() {
    let existing: ExistingIface =
        serde_yaml::from_str("name: eth0").unwrap();
    assert!(!existing.is_out_of_sync());
}

#[test]
fn test_net_config_differs_on_boot_protocol() {
    let mut desired = HostIface::new("eth0");
    desired.boot_protocol = BootProtocol::Dhcp;
    let existing = HostIface::new("eth0");
    assert!(desired.net_config_differs(&existing));
}

#[test]
fn test_net_config_static_fields_only_compared_for_static_boot() {
    let mut desired = HostIface::new("eth0");
    desired.address = Some("192.0.2.20".to_string());
    let mut existing = HostIface::new("eth0");
    // Both sides use boot protocol None, the address is irrelevant.
    assert!(!desired.net_config_differs(&existing));

    desired.boot_protocol = BootProtocol::StaticIp;
    existing.boot_protocol = BootProtocol::StaticIp;
    assert!(desired.net_config_differs(&existing));
}
