use std::time::Duration;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta, Utc};
use serde::Serialize;

use crate::model::route::{LatLng, RouteDefinition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Drive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPreference {
    TrafficAware,
    TrafficAwareOptimal,
}

/// body of a Routes API v2 computeRoutes request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub travel_mode: TravelMode,
    pub routing_preference: RoutingPreference,
    /// RFC 3339 UTC timestamp with a trailing 'Z'
    pub departure_time: String,
    pub compute_alternative_routes: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Waypoint {
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat_lng: WireLatLng,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WireLatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&LatLng> for Waypoint {
    fn from(value: &LatLng) -> Self {
        Waypoint {
            location: Location {
                lat_lng: WireLatLng {
                    latitude: value.lat,
                    longitude: value.lng,
                },
            },
        }
    }
}

impl ComputeRoutesRequest {
    /// builds a traffic-aware driving request for a route departing at `departure`.
    pub fn new(
        route: &RouteDefinition,
        departure: &DateTime<Utc>,
        compute_alternative_routes: bool,
    ) -> Self {
        Self {
            origin: Waypoint::from(&route.origin),
            destination: Waypoint::from(&route.destination),
            travel_mode: TravelMode::Drive,
            routing_preference: RoutingPreference::TrafficAwareOptimal,
            departure_time: departure.to_rfc3339_opts(SecondsFormat::Secs, true),
            compute_alternative_routes,
        }
    }
}

/// the departure time for a request issued at `now`, `lead` ahead since the
/// API rejects departures in the past.
pub fn departure_after(now: &DateTime<FixedOffset>, lead: Duration) -> DateTime<Utc> {
    let now_utc = now.with_timezone(&Utc);
    TimeDelta::from_std(lead)
        .ok()
        .and_then(|lead| now_utc.checked_add_signed(lead))
        .unwrap_or(now_utc)
}

#[cfg(test)]
mod test {
    use super::{departure_after, ComputeRoutesRequest};
    use crate::model::route::{LatLng, RouteDefinition, RouteId};
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use std::{str::FromStr, time::Duration};

    #[test]
    fn test_wire_format() {
        let route = RouteDefinition::new(
            RouteId::from_str("T01").unwrap(),
            Some(String::from("Test")),
            LatLng::new(41.70, 44.79),
            LatLng::new(41.67, 44.95),
        );
        let departure = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 30).unwrap();
        let request = ComputeRoutesRequest::new(&route, &departure, true);
        let encoded = serde_json::to_value(&request).unwrap();
        let expected = json!({
            "origin": {"location": {"latLng": {"latitude": 41.70, "longitude": 44.79}}},
            "destination": {"location": {"latLng": {"latitude": 41.67, "longitude": 44.95}}},
            "travelMode": "DRIVE",
            "routingPreference": "TRAFFIC_AWARE_OPTIMAL",
            "departureTime": "2026-10-16T08:00:30Z",
            "computeAlternativeRoutes": true
        });
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_departure_after() {
        let now = DateTime::parse_from_rfc3339("2026-10-16T09:00:00+04:00").unwrap();
        let departure = departure_after(&now, Duration::from_secs(30));
        assert_eq!(departure, Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 30).unwrap());
        assert_eq!(departure_after(&now, Duration::ZERO), now.with_timezone(&Utc));
    }
}
