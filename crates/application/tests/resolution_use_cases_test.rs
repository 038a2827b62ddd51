use geodns_application::ports::UpstreamResponse;
use geodns_application::use_cases::{
    GetZoneDelegationUseCase, ResolveAddressUseCase, ResolveNameServersUseCase,
};
use geodns_domain::{
    DelegationRecord, ErrorKind, NameServerRef, ResourceRecord, SoaInfo,
};
use std::net::Ipv4Addr;
use std::sync::Arc;

mod helpers;
use helpers::MockGeoDnsResolver;

fn soa() -> SoaInfo {
    SoaInfo {
        mname: Arc::from("ns1.example.com."),
        rname: Arc::from("hostmaster.example.com."),
        serial: 2024010101,
        refresh: 7200,
        retry: 3600,
        expire: 1209600,
        minimum: 300,
    }
}

// ============================================================================
// ResolveAddressUseCase
// ============================================================================

#[tokio::test]
async fn test_resolve_address_returns_records() {
    let resolver = Arc::new(MockGeoDnsResolver::new());
    resolver
        .set_a(
            "example.com",
            vec![ResourceRecord::a("example.com.", 300, Ipv4Addr::new(93, 184, 216, 34))],
        )
        .await;
    let use_case = ResolveAddressUseCase::new(resolver.clone());

    let addrs = use_case.addresses("example.com", "8.8.8.8").await.unwrap();

    assert_eq!(addrs, vec![Ipv4Addr::new(93, 184, 216, 34)]);
    assert_eq!(
        resolver.calls().await,
        vec![("example.com".to_string(), "8.8.8.8".to_string())]
    );
}

#[tokio::test]
async fn test_resolve_address_rejects_bad_client_ip() {
    let resolver = Arc::new(MockGeoDnsResolver::new());
    let use_case = ResolveAddressUseCase::new(resolver.clone());

    let err = use_case.execute("example.com", "not-an-ip").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadParam);
    assert!(resolver.calls().await.is_empty());
}

#[tokio::test]
async fn test_resolve_address_propagates_failure() {
    let resolver = Arc::new(MockGeoDnsResolver::new());
    let use_case = ResolveAddressUseCase::new(resolver);

    let err = use_case.execute("missing.example", "8.8.8.8").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
}

// ============================================================================
// ResolveNameServersUseCase / GetZoneDelegationUseCase
// ============================================================================

#[tokio::test]
async fn test_resolve_name_servers() {
    let resolver = Arc::new(MockGeoDnsResolver::new());
    resolver
        .set_ns(
            "example.com.",
            vec![
                NameServerRef::new("ns1.example.com.", 3600),
                NameServerRef::new("ns2.example.com.", 3600),
            ],
        )
        .await;
    let use_case = ResolveNameServersUseCase::new(resolver);

    let servers = use_case.execute("example.com.").await.unwrap();
    let hosts: Vec<&str> = servers.iter().map(|ns| ns.host.as_ref()).collect();

    assert_eq!(hosts, vec!["ns1.example.com.", "ns2.example.com."]);
}

#[tokio::test]
async fn test_get_zone_delegation() {
    let resolver = Arc::new(MockGeoDnsResolver::new());
    resolver
        .set_delegation(
            "www.example.com.",
            DelegationRecord::new(
                "example.com.",
                vec![NameServerRef::new("ns1.example.com.", 3600)],
                soa(),
            ),
        )
        .await;
    let use_case = GetZoneDelegationUseCase::new(resolver);

    let delegation = use_case.execute("www.example.com.").await.unwrap();

    assert_eq!(delegation.zone_key.as_ref(), "example.com.");
    assert_eq!(
        delegation.name_server_hosts().collect::<Vec<_>>(),
        vec!["ns1.example.com."]
    );
    assert_eq!(delegation.soa.expire, 1209600);
}

#[tokio::test]
async fn test_get_zone_delegation_no_result() {
    let use_case = GetZoneDelegationUseCase::new(Arc::new(MockGeoDnsResolver::new()));

    let err = use_case.execute("nowhere.invalid.").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResult);
}

// ============================================================================
// UpstreamResponse filtering
// ============================================================================

#[test]
fn test_upstream_response_filters_by_owner_and_type() {
    let response = UpstreamResponse {
        answers: vec![
            ResourceRecord::cname("www.example.com.", 60, "edge.example.net."),
            ResourceRecord::a("edge.example.net.", 60, Ipv4Addr::new(192, 0, 2, 1)),
            ResourceRecord::a("WWW.example.com.", 60, Ipv4Addr::new(192, 0, 2, 9)),
        ],
        ..Default::default()
    };

    assert_eq!(
        response.addresses("www.example.com."),
        vec![Ipv4Addr::new(192, 0, 2, 9)]
    );
    assert_eq!(response.cname_records("www.example.com.").len(), 1);
    assert!(response.a_records("other.example.com.").is_empty());
}

#[test]
fn test_upstream_response_soa_from_authority() {
    let response = UpstreamResponse {
        authority: vec![ResourceRecord::soa("example.com.", 900, soa())],
        ..Default::default()
    };

    let record = response.soa_record().unwrap();
    assert_eq!(record.name.as_ref(), "example.com.");
    assert!(response.ns_records().is_empty());
}
