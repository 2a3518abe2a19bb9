use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use geojson::FeatureCollection;
use kdam::{Bar, BarExt};
use routes_monitor_core::model::{
    api::{
        constants::SNAPSHOT_FIELD_MASK, departure_after, ComputeRoutesRequest, GoogleRoutesClient,
        RoutesApi,
    },
    keys::{KeyManager, KeySource},
};
use serde::Serialize;

use super::RouteSnapshot;
use crate::{
    app::{
        config::MonitorConfig,
        monitor::{Clock, SystemClock},
        MonitorError,
    },
    output::{create_dirs, OutputError, SampleStore},
};

#[derive(Clone, Debug)]
pub struct SnapshotOptions {
    pub config_file: PathBuf,
    /// GeoJSON destination. route data is written beside it with a .json extension.
    pub output_file: PathBuf,
    pub env_file: Option<PathBuf>,
    /// directory holding the key usage ledger shared with the monitor
    pub usage_directory: PathBuf,
}

#[derive(Serialize)]
struct SnapshotRecord<'a> {
    timestamp: String,
    routes: &'a [RouteSnapshot],
}

/// fetches every configured route once and writes a GeoJSON map of current
/// travel times.
pub fn run(options: &SnapshotOptions) -> Result<Vec<RouteSnapshot>, MonitorError> {
    let config = MonitorConfig::from_file(&options.config_file)?;
    let source = KeySource::Environment {
        dotenv_file: options.env_file.clone(),
    };
    let clock = SystemClock;
    let now = clock.now();
    create_dirs(&options.usage_directory)?;
    let ledger_path = SampleStore::ledger_file(&options.usage_directory);
    let mut key_manager =
        KeyManager::from_source(&source, config.api.usage_limit, config.api.rotation)?
            .attach_ledger(&ledger_path, &now)?;
    let api = GoogleRoutesClient::new(&config.api.endpoint, config.api.timeout)?;

    let snapshots = collect_snapshots(&config, &mut key_manager, &api, &clock)?;
    println!(
        "Successfully fetched {}/{} routes.",
        snapshots.len(),
        config.routes.len()
    );
    let (geojson_path, data_path) = write_snapshots(&snapshots, &options.output_file, &now)?;
    println!("Map saved to: {}", geojson_path.to_string_lossy());
    println!("Route data saved to: {}", data_path.to_string_lossy());
    Ok(snapshots)
}

/// requests each route with the polyline field mask, departing shortly after
/// the moment of each request. failed or empty routes are logged and left out;
/// running out of keys stops the collection.
pub fn collect_snapshots<A: RoutesApi, C: Clock>(
    config: &MonitorConfig,
    key_manager: &mut KeyManager,
    api: &A,
    clock: &C,
) -> Result<Vec<RouteSnapshot>, MonitorError> {
    let mut bar = Bar::builder()
        .desc("fetch route snapshots")
        .total(config.routes.len())
        .build()
        .map_err(MonitorError::ProgressBarError)?;

    let mut snapshots = vec![];
    for route in config.routes.iter() {
        let key = key_manager.active_key()?;
        let departure = departure_after(&clock.now(), config.api.departure_lead);
        let request =
            ComputeRoutesRequest::new(route, &departure, config.api.compute_alternative_routes);
        match api.compute_routes(&key, &request, SNAPSHOT_FIELD_MASK) {
            Ok(response) => {
                key_manager.record_usage(&key);
                key_manager.persist()?;
                match response.first_route() {
                    Some(leg) => snapshots.push(RouteSnapshot::from_route_leg(route, leg)),
                    None => log::warn!("No route found for {}", route.id),
                }
            }
            Err(e) => {
                if e.is_billed() {
                    key_manager.record_usage(&key);
                    key_manager.persist()?;
                }
                log::error!("Error fetching route {}: {e}", route.id);
            }
        }
        let _ = bar.update(1);
    }
    eprintln!();
    Ok(snapshots)
}

/// writes the GeoJSON map and the companion route data file, returning both paths.
pub fn write_snapshots(
    snapshots: &[RouteSnapshot],
    output_file: &Path,
    timestamp: &DateTime<FixedOffset>,
) -> Result<(PathBuf, PathBuf), OutputError> {
    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dirs(parent)?;
    }
    let data_file = companion_path(output_file);

    let collection = FeatureCollection {
        bbox: None,
        features: snapshots.iter().flat_map(|s| s.to_features()).collect(),
        foreign_members: None,
    };
    write_json(output_file, &collection)?;

    let record = SnapshotRecord {
        timestamp: timestamp.to_rfc3339(),
        routes: snapshots,
    };
    write_json(&data_file, &record)?;
    Ok((output_file.to_path_buf(), data_file))
}

/// the route data file sits beside the map with a .json extension
fn companion_path(output_file: &Path) -> PathBuf {
    match output_file.extension().and_then(|e| e.to_str()) {
        Some("json") => output_file.with_extension("routes.json"),
        _ => output_file.with_extension("json"),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let path_str = path.to_string_lossy().to_string();
    let contents = serde_json::to_string_pretty(value).map_err(|source| OutputError::JsonError {
        path: path_str.clone(),
        source,
    })?;
    std::fs::write(path, contents).map_err(|source| OutputError::WriteError {
        path: path_str,
        source,
    })
}

#[cfg(test)]
mod test {
    use super::{collect_snapshots, companion_path, write_snapshots};
    use crate::app::{
        config::MonitorConfig,
        test_util::{route, FakeRoutesApi, ManualClock, SteppingClock},
    };
    use chrono::{DateTime, TimeDelta};
    use routes_monitor_core::model::{
        api::{constants::SNAPSHOT_FIELD_MASK, RoutesApiError},
        keys::{ApiKey, KeyManager, RotationPolicy},
    };
    use serde_json::json;
    use std::path::Path;

    const EVENING: &str = "2026-10-16T18:00:00+04:00";

    fn config() -> MonitorConfig {
        MonitorConfig {
            routes: vec![route("T01"), route("T02"), route("T03")],
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_skips_failures() {
        let api = FakeRoutesApi::with_responses(vec![
            Err(RoutesApiError::TimeoutError(std::time::Duration::from_secs(10))),
            Ok(json!({})),
        ]);
        let mut km =
            KeyManager::new(vec![ApiKey::new("aaaa1111")], 100, RotationPolicy::Sticky).unwrap();
        let clock = ManualClock::at(EVENING);
        let snapshots = collect_snapshots(&config(), &mut km, &api, &clock).unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id.as_str(), "T03");
        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.field_mask == SNAPSHOT_FIELD_MASK));
        // the empty response still spent a call
        assert_eq!(km.usage_summary()[0].1, 2);
    }

    #[test]
    fn test_departure_follows_each_request() {
        let api = FakeRoutesApi::new();
        let mut km =
            KeyManager::new(vec![ApiKey::new("k1")], 100, RotationPolicy::Sticky).unwrap();
        // each route takes 20 seconds to fetch
        let clock = SteppingClock::at(EVENING, TimeDelta::seconds(20));
        collect_snapshots(&config(), &mut km, &api, &clock).unwrap();

        let departures = api
            .calls()
            .into_iter()
            .map(|c| c.request.departure_time)
            .collect::<Vec<_>>();
        assert_eq!(
            departures,
            vec![
                "2026-10-16T14:00:30Z",
                "2026-10-16T14:00:50Z",
                "2026-10-16T14:01:10Z"
            ]
        );
    }

    #[test]
    fn test_undecodable_success_counts_usage() {
        let api = FakeRoutesApi::with_responses(vec![Ok(json!({"routes": "none"}))]);
        let mut km =
            KeyManager::new(vec![ApiKey::new("k1")], 100, RotationPolicy::Sticky).unwrap();
        let snapshots =
            collect_snapshots(&config(), &mut km, &api, &ManualClock::at(EVENING)).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(km.usage_summary()[0].1, 3);
    }

    #[test]
    fn test_write_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeRoutesApi::new();
        let mut km =
            KeyManager::new(vec![ApiKey::new("k1")], 100, RotationPolicy::Sticky).unwrap();
        let now = DateTime::parse_from_rfc3339(EVENING).unwrap();
        let snapshots =
            collect_snapshots(&config(), &mut km, &api, &ManualClock::at(EVENING)).unwrap();

        let output = dir.path().join("output").join("routes_map.geojson");
        let (map_path, data_path) = write_snapshots(&snapshots, &output, &now).unwrap();
        assert_eq!(data_path, dir.path().join("output").join("routes_map.json"));

        let map: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(map_path).unwrap()).unwrap();
        assert_eq!(map["type"], "FeatureCollection");
        assert_eq!(map["features"].as_array().unwrap().len(), 9);

        let data: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(data_path).unwrap()).unwrap();
        assert_eq!(data["timestamp"], "2026-10-16T18:00:00+04:00");
        assert_eq!(data["routes"].as_array().unwrap().len(), 3);
        assert_eq!(data["routes"][0]["travel_time_text"], "18 min");
        assert_eq!(data["routes"][0]["coordinates"][0][0], 38.5);
    }

    #[test]
    fn test_companion_path() {
        assert_eq!(
            companion_path(Path::new("output/routes_map.geojson")),
            Path::new("output/routes_map.json")
        );
        assert_eq!(
            companion_path(Path::new("map.json")),
            Path::new("map.routes.json")
        );
    }
}
