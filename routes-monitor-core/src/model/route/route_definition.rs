use std::{collections::HashSet, time::Duration};

use serde::{Deserialize, Serialize};

use super::{LatLng, RouteConfigError, RouteId};
use crate::util::duration_codec;

/// upper bound for any sampling interval, per-route or policy-wide.
pub const MAX_SAMPLING_INTERVAL: Duration = Duration::from_secs(31 * 24 * 60 * 60);

/// an origin/destination pair monitored for travel time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub id: RouteId,
    #[serde(default)]
    pub name: Option<String>,
    pub origin: LatLng,
    pub destination: LatLng,
    /// fixed sampling interval for this route. when absent, the time-of-day
    /// sampling policy decides.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "duration_codec::optional_humantime_duration"
    )]
    pub interval: Option<Duration>,
}

impl RouteDefinition {
    pub fn new(id: RouteId, name: Option<String>, origin: LatLng, destination: LatLng) -> Self {
        Self {
            id,
            name,
            origin,
            destination,
            interval: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn validate(&self) -> Result<(), RouteConfigError> {
        for (endpoint, coord) in [("origin", &self.origin), ("destination", &self.destination)] {
            if !coord.is_valid() {
                return Err(RouteConfigError::InvalidCoordinateError {
                    route_id: self.id.to_string(),
                    endpoint: endpoint.to_string(),
                    lat: coord.lat,
                    lng: coord.lng,
                });
            }
        }
        match self.interval {
            Some(i) if i.is_zero() => Err(RouteConfigError::InvalidIntervalError(
                self.id.to_string(),
                String::from("interval must be greater than zero"),
            )),
            Some(i) if i > MAX_SAMPLING_INTERVAL => Err(RouteConfigError::InvalidIntervalError(
                self.id.to_string(),
                format!(
                    "{} exceeds the maximum of {}",
                    humantime::format_duration(i),
                    humantime::format_duration(MAX_SAMPLING_INTERVAL)
                ),
            )),
            _ => Ok(()),
        }
    }
}

/// validates each route and confirms route ids are unique.
pub fn validate_routes(routes: &[RouteDefinition]) -> Result<(), RouteConfigError> {
    let mut seen: HashSet<&RouteId> = HashSet::new();
    for route in routes.iter() {
        route.validate()?;
        if !seen.insert(&route.id) {
            return Err(RouteConfigError::DuplicateRouteIdError(route.id.to_string()));
        }
    }
    Ok(())
}
