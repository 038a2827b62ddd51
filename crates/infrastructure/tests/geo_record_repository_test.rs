use geodns_application::ports::{GeoRecordStore, StoredRegion};
use geodns_domain::{ErrorKind, RecordType};
use geodns_infrastructure::repositories::SqliteGeoRecordRepository;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::Ipv4Addr;

async fn create_test_db() -> sqlx::SqlitePool {
    // One connection: every connection to sqlite::memory: is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    for statement in [
        "CREATE TABLE geo_domains (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE
        )",
        "CREATE TABLE geo_regions (
            id INTEGER PRIMARY KEY,
            ip_start INTEGER NOT NULL,
            ip_end INTEGER NOT NULL
        )",
        "CREATE TABLE geo_records (
            id INTEGER PRIMARY KEY,
            domain_id INTEGER NOT NULL,
            region_id INTEGER NOT NULL,
            rr_type TEXT NOT NULL,
            class INTEGER NOT NULL DEFAULT 1,
            ttl INTEGER NOT NULL,
            target TEXT NOT NULL
        )",
    ] {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    pool
}

fn ip(s: &str) -> i64 {
    i64::from(u32::from(s.parse::<Ipv4Addr>().unwrap()))
}

async fn seed(pool: &sqlx::SqlitePool) {
    sqlx::query("INSERT INTO geo_domains (id, name) VALUES (1, 'www.geo.test'), (2, 'alias.geo.test.')")
        .execute(pool)
        .await
        .unwrap();

    for (id, start, end) in [
        (0, "0.0.0.0", "255.255.255.255"),
        (1, "10.0.0.0", "10.255.255.255"),
        (2, "10.1.0.0", "10.1.255.255"),
    ] {
        sqlx::query("INSERT INTO geo_regions (id, ip_start, ip_end) VALUES (?, ?, ?)")
            .bind(id)
            .bind(ip(start))
            .bind(ip(end))
            .execute(pool)
            .await
            .unwrap();
    }

    for (domain_id, region_id, rr_type, ttl, target) in [
        (1, 1, "A", 120, "10.0.0.10"),
        (1, 1, "A", 120, "10.0.0.11"),
        (1, 1, "CNAME", 120, "ignored.geo.test"),
        (1, 0, "A", 600, "192.0.2.1"),
        (2, 0, "cname", 300, "www.geo.test"),
    ] {
        sqlx::query(
            "INSERT INTO geo_records (domain_id, region_id, rr_type, ttl, target)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(domain_id)
        .bind(region_id)
        .bind(rr_type)
        .bind(ttl)
        .bind(target)
        .execute(pool)
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_domain_id_ignores_trailing_dot_and_case() {
    let pool = create_test_db().await;
    seed(&pool).await;
    let repo = SqliteGeoRecordRepository::new(pool);

    assert_eq!(repo.domain_id("www.geo.test.").await.unwrap(), 1);
    assert_eq!(repo.domain_id("WWW.geo.test").await.unwrap(), 1);
    assert_eq!(repo.domain_id("alias.geo.test").await.unwrap(), 2);
    assert_eq!(
        repo.domain_id("nope.geo.test").await.unwrap_err().kind(),
        ErrorKind::NoResult
    );
}

#[tokio::test]
async fn test_region_for_ip_prefers_narrowest_range() {
    let pool = create_test_db().await;
    seed(&pool).await;
    let repo = SqliteGeoRecordRepository::new(pool);

    let region = repo.region_for_ip(ip("10.1.2.3") as u32).await.unwrap();
    assert_eq!(
        region,
        StoredRegion {
            region_id: 2,
            ip_start: ip("10.1.0.0") as u32,
            ip_end: ip("10.1.255.255") as u32,
        }
    );

    assert_eq!(repo.region_for_ip(ip("10.9.9.9") as u32).await.unwrap().region_id, 1);
    assert_eq!(repo.region_for_ip(ip("8.8.8.8") as u32).await.unwrap().region_id, 0);
}

#[tokio::test]
async fn test_region_for_ip_without_match_is_no_result() {
    let pool = create_test_db().await;
    let repo = SqliteGeoRecordRepository::new(pool);

    let err = repo.region_for_ip(ip("8.8.8.8") as u32).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResult);
}

#[tokio::test]
async fn test_records_form_one_set_from_first_row() {
    let pool = create_test_db().await;
    seed(&pool).await;
    let repo = SqliteGeoRecordRepository::new(pool);

    let set = repo.records(1, 1).await.unwrap();
    assert_eq!(set.record_type, RecordType::A);
    assert_eq!(set.ttl, 120);
    assert_eq!(set.class, 1);
    let targets: Vec<&str> = set.targets.iter().map(|t| t.as_ref()).collect();
    assert_eq!(targets, vec!["10.0.0.10", "10.0.0.11"]);

    let alias = repo.records(2, 0).await.unwrap();
    assert_eq!(alias.record_type, RecordType::CNAME);
    assert_eq!(alias.targets[0].as_ref(), "www.geo.test");
}

#[tokio::test]
async fn test_records_missing_pair_is_no_result() {
    let pool = create_test_db().await;
    seed(&pool).await;
    let repo = SqliteGeoRecordRepository::new(pool);

    let err = repo.records(1, 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResult);
}

#[tokio::test]
async fn test_create_pool_applies_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geo.db");
    let pool = geodns_infrastructure::database::create_pool(path.to_str().unwrap())
        .await
        .unwrap();

    sqlx::query("INSERT INTO geo_domains (id, name) VALUES (5, 'fresh.test')")
        .execute(&pool)
        .await
        .unwrap();
    let repo = SqliteGeoRecordRepository::new(pool);
    assert_eq!(repo.domain_id("fresh.test.").await.unwrap(), 5);
}
