//! Server configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

use crate::hazard::DEFAULT_UPSTREAM_TIMEOUT;

pub const DEFAULT_HAZARD_DATA: &str = "data/hazard_polygons.json";
pub const DEFAULT_FACILITY_DATA: &str = "data/facilities.json";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Polygon records (JSON array) backing the spatial index
    pub hazard_data: PathBuf,
    /// Facility records (JSON array) backing the static provider
    pub facility_data: PathBuf,
    /// Optional scoring table override
    pub risk_tables: Option<PathBuf>,
    pub upstream_timeout: Duration,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hazard_data: PathBuf::from(DEFAULT_HAZARD_DATA),
            facility_data: PathBuf::from(DEFAULT_FACILITY_DATA),
            risk_tables: None,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read `HAZARD_DATA`, `FACILITY_DATA`, `RISK_TABLES`, `UPSTREAM_TIMEOUT_MS` and `PORT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable numbers fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.upstream_timeout);

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            hazard_data: lookup("HAZARD_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.hazard_data),
            facility_data: lookup("FACILITY_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.facility_data),
            risk_tables: lookup("RISK_TABLES")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            upstream_timeout,
            port,
        }
    }

    pub fn log(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  HAZARD_DATA: {}", self.hazard_data.display());
        tracing::info!("  FACILITY_DATA: {}", self.facility_data.display());
        match &self.risk_tables {
            Some(path) => tracing::info!("  RISK_TABLES: {}", path.display()),
            None => tracing::info!("  RISK_TABLES: (built-in defaults)"),
        }
        tracing::info!("  UPSTREAM_TIMEOUT_MS: {}", self.upstream_timeout.as_millis());
        tracing::info!("  PORT: {}", self.port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HAZARD_DATA", "/srv/hazards.json"),
            ("RISK_TABLES", "/srv/tables.json"),
            ("UPSTREAM_TIMEOUT_MS", "1500"),
            ("PORT", "8080"),
        ]);
        assert_eq!(config.hazard_data, PathBuf::from("/srv/hazards.json"));
        assert_eq!(config.risk_tables, Some(PathBuf::from("/srv/tables.json")));
        assert_eq!(config.upstream_timeout, Duration::from_millis(1500));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("UPSTREAM_TIMEOUT_MS", "0")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_timeout, DEFAULT_UPSTREAM_TIMEOUT);
    }
}
