use geodns_domain::{ErrorKind, RegionEntry, RegionKey, ResourceRecord, RecordType};
use std::net::Ipv4Addr;

fn a_record(ip: [u8; 4], ttl: u32) -> ResourceRecord {
    ResourceRecord::a("example.com.", ttl, Ipv4Addr::from(ip))
}

#[test]
fn test_region_key_masks_network() {
    let key = RegionKey::new(u32::from(Ipv4Addr::new(10, 1, 2, 3)), 8).unwrap();

    assert_eq!(key.network, u32::from(Ipv4Addr::new(10, 0, 0, 0)));
    assert_eq!(key.to_string(), "10.0.0.0/8");
}

#[test]
fn test_region_key_contains() {
    let key: RegionKey = "192.168.0.0/16".parse().unwrap();

    assert!(key.contains(u32::from(Ipv4Addr::new(192, 168, 44, 1))));
    assert!(!key.contains(u32::from(Ipv4Addr::new(192, 169, 0, 1))));
    assert!(RegionKey::CATCH_ALL.contains(u32::from(Ipv4Addr::new(1, 2, 3, 4))));
}

#[test]
fn test_region_key_rejects_long_prefix() {
    let err = RegionKey::new(0, 33).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadParam);
}

#[test]
fn test_region_key_ipnetwork_conversion() {
    let key: RegionKey = "172.16.0.0/12".parse().unwrap();
    let net = key.to_network().unwrap();

    assert_eq!(net.prefix(), 12);
    assert_eq!(RegionKey::from(net), key);
}

#[test]
fn test_region_entry_takes_type_and_ttl_from_first_record() {
    let entry = RegionEntry::new(
        vec![a_record([1, 1, 1, 1], 300), a_record([2, 2, 2, 2], 60)],
        u32::from(Ipv4Addr::new(10, 0, 0, 0)),
        8,
    )
    .unwrap();

    assert_eq!(entry.record_type, RecordType::A);
    assert_eq!(entry.ttl, 300);
    assert_eq!(entry.records.len(), 2);
    assert!(entry.cname_target().is_none());
}

#[test]
fn test_region_entry_rejects_empty_records() {
    let err = RegionEntry::catch_all(vec![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadParam);
}

#[test]
fn test_region_entry_cname_target() {
    let entry = RegionEntry::catch_all(vec![ResourceRecord::cname(
        "alias.example.com.",
        120,
        "example.com.",
    )])
    .unwrap();

    assert_eq!(entry.record_type, RecordType::CNAME);
    assert_eq!(entry.cname_target(), Some("example.com."));
    assert!(entry.key.is_catch_all());
}
