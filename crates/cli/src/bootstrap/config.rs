use geodns_domain::Config;

/// Loads and validates the configuration, then applies command-line
/// overrides. Runs before logging is up, so nothing is logged here.
pub fn load_config(config_path: Option<&str>, log_level: Option<&str>) -> anyhow::Result<Config> {
    let mut config = Config::load(config_path)?;

    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }

    Ok(config)
}
