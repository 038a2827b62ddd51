use async_trait::async_trait;
use geodns_application::ports::{GeoRecordStore, StoredRecordSet, StoredRegion};
use geodns_domain::{DomainError, RecordType};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument, warn};

type RegionRow = (i64, i64, i64);
type RecordRow = (String, i64, i64, String);

/// Geo record store over the `geo_domains`, `geo_regions` and
/// `geo_records` tables.
pub struct SqliteGeoRecordRepository {
    pool: SqlitePool,
}

impl SqliteGeoRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn db_error(e: sqlx::Error) -> DomainError {
        error!(error = %e, "Geo record query failed");
        DomainError::DatabaseError(e.to_string())
    }

    fn row_to_region(row: RegionRow) -> Result<StoredRegion, DomainError> {
        let (region_id, ip_start, ip_end) = row;
        let to_addr = |value: i64| {
            u32::try_from(value).map_err(|_| {
                DomainError::DatabaseError(format!(
                    "region {} has an address outside IPv4: {}",
                    region_id, value
                ))
            })
        };

        Ok(StoredRegion {
            region_id,
            ip_start: to_addr(ip_start)?,
            ip_end: to_addr(ip_end)?,
        })
    }

    /// Folds rows into one record set; the first row decides type, class
    /// and TTL, rows that disagree on type are skipped.
    fn rows_to_set(rows: Vec<RecordRow>) -> Result<Option<StoredRecordSet>, DomainError> {
        let mut rows = rows.into_iter();
        let Some((rr_type, class, ttl, target)) = rows.next() else {
            return Ok(None);
        };

        let record_type: RecordType = rr_type.parse().map_err(DomainError::DatabaseError)?;
        let mut set = StoredRecordSet {
            record_type,
            class: u16::try_from(class).unwrap_or(geodns_domain::CLASS_IN),
            ttl: u32::try_from(ttl).unwrap_or_default(),
            targets: vec![Arc::from(target.as_str())],
        };

        for (rr_type, _, _, target) in rows {
            if rr_type.eq_ignore_ascii_case(record_type.as_str()) {
                set.targets.push(Arc::from(target.as_str()));
            } else {
                warn!(expected = %record_type, found = %rr_type, "Mixed record types in one region");
            }
        }

        Ok(Some(set))
    }
}

#[async_trait]
impl GeoRecordStore for SqliteGeoRecordRepository {
    #[instrument(skip(self))]
    async fn domain_id(&self, name: &str) -> Result<i64, DomainError> {
        let bare = name.trim_end_matches('.');

        let row = sqlx::query_as::<_, (i64,)>(
            "SELECT id FROM geo_domains WHERE name = ? OR name = ? LIMIT 1",
        )
        .bind(bare)
        .bind(format!("{}.", bare))
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_error)?;

        row.map(|(id,)| id)
            .ok_or_else(|| DomainError::NoResult(format!("domain {} not in record store", name)))
    }

    #[instrument(skip(self))]
    async fn region_for_ip(&self, addr: u32) -> Result<StoredRegion, DomainError> {
        let row = sqlx::query_as::<_, RegionRow>(
            "SELECT id, ip_start, ip_end FROM geo_regions
             WHERE ip_start <= ? AND ip_end >= ?
             ORDER BY (ip_end - ip_start) ASC
             LIMIT 1",
        )
        .bind(i64::from(addr))
        .bind(i64::from(addr))
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_error)?;

        match row {
            Some(row) => Self::row_to_region(row),
            None => Err(DomainError::NoResult(format!("no region contains {}", addr))),
        }
    }

    #[instrument(skip(self))]
    async fn records(
        &self,
        domain_id: i64,
        region_id: i64,
    ) -> Result<StoredRecordSet, DomainError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT rr_type, class, ttl, target FROM geo_records
             WHERE domain_id = ? AND region_id = ?
             ORDER BY id",
        )
        .bind(domain_id)
        .bind(region_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_error)?;

        Self::rows_to_set(rows)?.ok_or_else(|| {
            DomainError::NoResult(format!(
                "no records for domain {} in region {}",
                domain_id, region_id
            ))
        })
    }
}
