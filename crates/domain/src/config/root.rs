use serde::{Deserialize, Serialize};
use std::path::Path;

use super::backend::BackendConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, or defaults when no file is given or found
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_paths = ["geodns.toml", "/etc/geodns/config.toml"];
                let mut loaded = None;
                for path in &default_paths {
                    if Path::new(path).exists() {
                        loaded = Some(Self::from_file(path)?);
                        break;
                    }
                }
                loaded.unwrap_or_default()
            }
        };

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(format!("{}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn normalize(&mut self) {
        self.logging.level = self.logging.level.trim().to_lowercase();
        for domain in &mut self.backend.local_domains {
            *domain = domain.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.resolver;
        if r.cname_chain_length == 0 {
            return Err(ConfigError::Validation(
                "resolver.cname_chain_length must be at least 1".to_string(),
            ));
        }
        if r.max_domain_labels == 0 {
            return Err(ConfigError::Validation(
                "resolver.max_domain_labels must be at least 1".to_string(),
            ));
        }
        if r.edns_source_mask > 32 || r.edns_source_scope > 32 {
            return Err(ConfigError::Validation(format!(
                "EDNS prefixes must be <= 32 (mask {}, scope {})",
                r.edns_source_mask, r.edns_source_scope
            )));
        }

        let u = &self.upstream;
        if u.dial_timeout_ms == 0 || u.write_timeout_ms == 0 || u.read_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream timeouts must be non-zero".to_string(),
            ));
        }
        if u.port == 0 {
            return Err(ConfigError::Validation(
                "upstream.port must be non-zero".to_string(),
            ));
        }
        for resolver in &u.resolvers {
            if resolver.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "upstream.resolvers contains an empty entry".to_string(),
                ));
            }
        }

        if !self.backend.local_domains.is_empty() && !self.backend.is_enabled() {
            return Err(ConfigError::Validation(
                "backend.local_domains requires backend.database_path".to_string(),
            ));
        }

        Ok(())
    }
}
