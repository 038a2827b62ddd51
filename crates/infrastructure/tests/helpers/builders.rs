use super::MockDnsExchange;
use geodns_application::ports::UpstreamResponse;
use geodns_domain::{
    BackendConfig, ClientSubnet, RecordType, RegionEntry, ResolverConfig, ResourceRecord,
    SoaInfo,
};
use geodns_infrastructure::dns::{DomainEntry, GeoResolver};
use std::net::Ipv4Addr;
use std::sync::Arc;

pub const RECURSIVE_RESOLVER: &str = "127.0.0.53";

pub fn soa_info(expire: u32) -> SoaInfo {
    SoaInfo {
        mname: Arc::from("ns1.example.net."),
        rname: Arc::from("hostmaster.example.net."),
        serial: 2024010101,
        refresh: 7200,
        retry: 900,
        expire,
        minimum: 300,
    }
}

pub fn soa_answer(zone: &str, expire: u32) -> UpstreamResponse {
    UpstreamResponse {
        answers: vec![ResourceRecord::soa(zone, 3600, soa_info(expire))],
        ..Default::default()
    }
}

/// SOA in the authority section, as servers answer for names below a zone apex.
pub fn soa_authority(zone: &str, expire: u32) -> UpstreamResponse {
    UpstreamResponse {
        authority: vec![ResourceRecord::soa(zone, 3600, soa_info(expire))],
        ..Default::default()
    }
}

pub fn ns_answer(zone: &str, hosts: &[&str]) -> UpstreamResponse {
    UpstreamResponse {
        answers: hosts
            .iter()
            .map(|host| ResourceRecord::ns(zone, 86400, *host))
            .collect(),
        ..Default::default()
    }
}

pub fn a_answer(
    name: &str,
    ttl: u32,
    addrs: &[&str],
    echoed: Option<ClientSubnet>,
) -> UpstreamResponse {
    UpstreamResponse {
        answers: addrs
            .iter()
            .map(|addr| ResourceRecord::a(name, ttl, addr.parse::<Ipv4Addr>().unwrap()))
            .collect(),
        client_subnet: echoed,
        ..Default::default()
    }
}

pub fn cname_answer(name: &str, ttl: u32, target: &str) -> UpstreamResponse {
    UpstreamResponse {
        answers: vec![ResourceRecord::cname(name, ttl, target)],
        ..Default::default()
    }
}

pub fn a_record(name: &str, addr: &str) -> ResourceRecord {
    ResourceRecord::a(name, 300, addr.parse::<Ipv4Addr>().unwrap())
}

/// Registers SOA + NS answers for `zone` on the mock.
pub async fn serve_zone(exchange: &MockDnsExchange, zone: &str, name_servers: &[&str]) {
    exchange
        .set_answer(zone, RecordType::SOA, soa_answer(zone, 604800))
        .await;
    exchange
        .set_answer(zone, RecordType::NS, ns_answer(zone, name_servers))
        .await;
}

pub fn upstream_resolver(exchange: Arc<MockDnsExchange>) -> GeoResolver {
    GeoResolver::builder(exchange)
        .with_recursive_resolvers(vec![RECURSIVE_RESOLVER.to_string()])
        .build()
}

pub fn resolver_with_settings(
    exchange: Arc<MockDnsExchange>,
    settings: ResolverConfig,
) -> GeoResolver {
    GeoResolver::builder(exchange)
        .with_recursive_resolvers(vec![RECURSIVE_RESOLVER.to_string()])
        .with_resolver_config(settings)
        .build()
}

pub fn local_backend(zones: &[&str]) -> BackendConfig {
    BackendConfig {
        local_domains: zones.iter().map(|z| z.to_string()).collect(),
        database_path: "geo.db".to_string(),
    }
}

/// Caches `domain` with a single catch-all region holding `records`.
pub fn seed_catch_all(resolver: &GeoResolver, domain: &str, zone: &str, records: Vec<ResourceRecord>) {
    let entry = DomainEntry::new(domain, zone, 3600).unwrap();
    entry
        .ensure_region_index()
        .insert(RegionEntry::catch_all(records).unwrap())
        .unwrap();
    resolver.domains().store(entry).unwrap();
}

/// Polls `check` under the paused clock until it holds or the budget runs out.
pub async fn eventually<F: Fn() -> bool>(check: F) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    check()
}
