use geodns_application::ports::GeoRecordStore;
use geodns_domain::BackendConfig;
use geodns_infrastructure::database::create_pool;
use geodns_infrastructure::repositories::SqliteGeoRecordRepository;
use std::sync::Arc;
use tracing::{error, info};

/// Opens the relational backend when one is configured.
pub async fn init_record_store(
    backend: &BackendConfig,
) -> anyhow::Result<Option<Arc<dyn GeoRecordStore>>> {
    if !backend.is_enabled() {
        info!("Relational backend disabled, every zone resolves upstream");
        return Ok(None);
    }

    let pool = create_pool(&backend.database_path).await.map_err(|e| {
        error!(database = %backend.database_path, "Failed to open geo record database: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        database = %backend.database_path,
        local_domains = ?backend.local_domains,
        "Relational backend ready"
    );
    Ok(Some(Arc::new(SqliteGeoRecordRepository::new(pool))))
}
