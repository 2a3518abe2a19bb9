use serde::Deserialize;

use super::RoutesApiError;

/// the subset of a computed route that the monitor records.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteLeg {
    /// travel time with traffic, in seconds
    pub duration_seconds: u64,
    /// travel time without traffic, in seconds
    pub static_duration_seconds: u64,
    pub distance_meters: u64,
    pub encoded_polyline: Option<String>,
}

impl RouteLeg {
    /// extra travel time caused by traffic. negative when traffic beats the
    /// static estimate.
    pub fn delay_seconds(&self) -> i64 {
        self.duration_seconds as i64 - self.static_duration_seconds as i64
    }
}

/// a decoded computeRoutes response. the original JSON is kept in `raw` so it
/// can be archived unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputeRoutesResponse {
    pub routes: Vec<RouteLeg>,
    pub raw: serde_json::Value,
}

impl ComputeRoutesResponse {
    pub fn first_route(&self) -> Option<&RouteLeg> {
        self.routes.first()
    }
}

#[derive(Deserialize)]
struct ResponseWire {
    #[serde(default)]
    routes: Vec<RouteWire>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteWire {
    duration: Option<String>,
    static_duration: Option<String>,
    distance_meters: Option<u64>,
    polyline: Option<PolylineWire>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolylineWire {
    encoded_polyline: Option<String>,
}

impl TryFrom<serde_json::Value> for ComputeRoutesResponse {
    type Error = RoutesApiError;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        let wire: ResponseWire = serde_json::from_value(raw.clone())
            .map_err(|e| RoutesApiError::InvalidResponseError(e.to_string()))?;
        let routes = wire
            .routes
            .into_iter()
            .map(|r| {
                Ok(RouteLeg {
                    duration_seconds: parse_duration_seconds(
                        r.duration.as_deref().unwrap_or("0s"),
                    )?,
                    static_duration_seconds: parse_duration_seconds(
                        r.static_duration.as_deref().unwrap_or("0s"),
                    )?,
                    distance_meters: r.distance_meters.unwrap_or_default(),
                    encoded_polyline: r.polyline.and_then(|p| p.encoded_polyline),
                })
            })
            .collect::<Result<Vec<_>, RoutesApiError>>()?;
        Ok(ComputeRoutesResponse { routes, raw })
    }
}

/// parses a protobuf JSON duration ("1080s", "12.5s") into whole seconds,
/// rounding fractional values. negative durations are rejected.
pub fn parse_duration_seconds(value: &str) -> Result<u64, RoutesApiError> {
    let invalid = || RoutesApiError::InvalidDurationError(value.to_string());
    let number = value.trim().strip_suffix('s').ok_or_else(invalid)?;
    let seconds: f64 = number.parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }
    Ok(seconds.round() as u64)
}
