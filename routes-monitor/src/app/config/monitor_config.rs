use std::path::Path;

use config::{Config, FileFormat};
use routes_monitor_core::model::{
    route::{validate_routes, RouteConfigError, RouteDefinition},
    schedule::SamplingPolicy,
};
use serde::{Deserialize, Serialize};

use super::ApiConfig;
use crate::app::MonitorError;

/// contents of the routes configuration file. only `routes` is required.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
    #[serde(default)]
    pub sampling: SamplingPolicy,
    #[serde(default)]
    pub api: ApiConfig,
}

impl MonitorConfig {
    /// reads a JSON (or, by extension, TOML) routes file and validates it.
    pub fn from_file(path: &Path) -> Result<MonitorConfig, MonitorError> {
        let path_str = path.to_string_lossy().to_string();
        if !path.is_file() {
            return Err(MonitorError::ConfigNotFoundError(path_str));
        }
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        };
        let config = Config::builder()
            .add_source(config::File::new(&path_str, format))
            .build()
            .map_err(|e| MonitorError::ConfigReadError {
                msg: format!("failed reading '{path_str}'"),
                source: e,
            })?;
        let monitor_config = config
            .try_deserialize::<MonitorConfig>()
            .map_err(|e| MonitorError::ConfigReadError {
                msg: format!("failed decoding '{path_str}'"),
                source: e,
            })?;
        monitor_config.validate()?;
        if monitor_config.routes.is_empty() {
            log::warn!("no routes configured in {path_str}");
        }
        log::info!(
            "Loaded {} routes from {path_str}",
            monitor_config.routes.len()
        );
        Ok(monitor_config)
    }

    pub fn validate(&self) -> Result<(), RouteConfigError> {
        validate_routes(&self.routes)?;
        self.sampling.validate()
    }
}

#[cfg(test)]
mod test {
    use super::MonitorConfig;
    use crate::app::MonitorError;
    use routes_monitor_core::model::keys::RotationPolicy;
    use std::{path::Path, time::Duration};

    fn write_config(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "routes.json",
            r#"{
                "routes": [
                    {"id": "T01", "name": "Test", "origin": {"lat": 0, "lng": 0}, "destination": {"lat": 1, "lng": 1}}
                ]
            }"#,
        );
        let config = MonitorConfig::from_file(&path).unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].id.as_str(), "T01");
        assert_eq!(config.api.usage_limit, 4800);
        assert_eq!(config.api.rotation, RotationPolicy::Sticky);
        assert_eq!(config.sampling.bands.len(), 2);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "routes.json",
            r#"{
                "routes": [
                    {"id": "T01", "origin": {"lat": 41.7, "lng": 44.8}, "destination": {"lat": 41.6, "lng": 44.9}, "interval": "10m"}
                ],
                "sampling": {
                    "bands": [{"name": "rush", "hours": [[7, 10]], "interval": "5m"}],
                    "default_interval": "1h"
                },
                "api": {"usage_limit": 100, "rotation": "round_robin", "request_spacing": "1s"}
            }"#,
        );
        let config = MonitorConfig::from_file(&path).unwrap();
        assert_eq!(config.routes[0].interval, Some(Duration::from_secs(600)));
        assert_eq!(config.sampling.bands[0].name, "rush");
        assert_eq!(config.sampling.default_interval, Duration::from_secs(3600));
        assert_eq!(config.api.usage_limit, 100);
        assert_eq!(config.api.rotation, RotationPolicy::RoundRobin);
        assert_eq!(config.api.request_spacing, Duration::from_secs(1));
        assert_eq!(config.api.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "routes.toml",
            r#"
[[routes]]
id = "T01"
origin = { lat = 41.7, lng = 44.8 }
destination = { lat = 41.6, lng = 44.9 }
"#,
        );
        let config = MonitorConfig::from_file(&path).unwrap();
        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let result = MonitorConfig::from_file(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(MonitorError::ConfigNotFoundError(_))));
    }

    #[test]
    fn test_invalid_route_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "routes.json",
            r#"{"routes": [{"id": "bad id", "origin": {"lat": 0, "lng": 0}, "destination": {"lat": 1, "lng": 1}}]}"#,
        );
        let err = MonitorConfig::from_file(&path).expect_err("id with a space must be rejected");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "routes.json",
            r#"{"routes": [
                {"id": "T01", "origin": {"lat": 0, "lng": 0}, "destination": {"lat": 1, "lng": 1}},
                {"id": "T01", "origin": {"lat": 0, "lng": 0}, "destination": {"lat": 2, "lng": 2}}
            ]}"#,
        );
        assert!(matches!(
            MonitorConfig::from_file(&path),
            Err(MonitorError::RouteConfigError(_))
        ));
    }

    #[test]
    fn test_out_of_range_coordinate_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "routes.json",
            r#"{"routes": [{"id": "T01", "origin": {"lat": 95, "lng": 0}, "destination": {"lat": 1, "lng": 1}}]}"#,
        );
        assert!(matches!(
            MonitorConfig::from_file(&path),
            Err(MonitorError::RouteConfigError(_))
        ));
    }

    #[test]
    fn test_empty_routes_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "routes.json", r#"{"routes": []}"#);
        assert!(MonitorConfig::from_file(&path).unwrap().routes.is_empty());
    }
}
