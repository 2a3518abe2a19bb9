use geo::{Coord, LineString, Point};
use geojson::{Feature, JsonObject};
use routes_monitor_core::model::{
    api::{polyline, RouteLeg},
    route::{RouteDefinition, RouteId},
    sample::{format_distance, format_travel_time, TrafficCondition},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// current travel time and shape of one route, as drawn on the snapshot map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    pub id: RouteId,
    pub name: String,
    pub travel_time_seconds: u64,
    pub static_duration_seconds: u64,
    pub travel_time_text: String,
    pub distance_meters: u64,
    pub distance_text: String,
    pub delay_seconds: i64,
    pub traffic_condition: TrafficCondition,
    pub color: String,
    /// decoded route polyline as [lat, lng] pairs
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteSnapshot {
    /// builds a snapshot from the first route of a response. a polyline that
    /// fails to decode leaves the snapshot without coordinates.
    pub fn from_route_leg(route: &RouteDefinition, leg: &RouteLeg) -> RouteSnapshot {
        let coordinates = match leg.encoded_polyline.as_deref() {
            Some(encoded) if !encoded.is_empty() => match polyline::decode(encoded) {
                Ok(line) => line.coords().map(|c| [c.y, c.x]).collect(),
                Err(e) => {
                    log::warn!("route {} has an unreadable polyline: {e}", route.id);
                    vec![]
                }
            },
            _ => vec![],
        };
        let traffic_condition =
            TrafficCondition::from_speed(leg.distance_meters, leg.duration_seconds);
        RouteSnapshot {
            id: route.id.clone(),
            name: route.display_name().to_string(),
            travel_time_seconds: leg.duration_seconds,
            static_duration_seconds: leg.static_duration_seconds,
            travel_time_text: format_travel_time(leg.duration_seconds),
            distance_meters: leg.distance_meters,
            distance_text: format_distance(leg.distance_meters),
            delay_seconds: leg.delay_seconds(),
            traffic_condition,
            color: traffic_condition.color().to_string(),
            coordinates,
        }
    }

    /// route geometry with x=longitude, y=latitude
    pub fn line_string(&self) -> Option<LineString<f64>> {
        if self.coordinates.len() < 2 {
            return None;
        }
        let coords = self
            .coordinates
            .iter()
            .map(|[lat, lng]| Coord { x: *lng, y: *lat })
            .collect::<Vec<_>>();
        Some(LineString::new(coords))
    }

    /// a LineString feature carrying the travel time properties, plus Point
    /// features at the start and end of the route. empty when the route has
    /// no geometry.
    pub fn to_features(&self) -> Vec<Feature> {
        let Some(line) = self.line_string() else {
            return vec![];
        };
        let mut features = vec![feature(
            geo::Geometry::LineString(line.clone()),
            json!({
                "id": self.id,
                "name": self.name,
                "travel_time_seconds": self.travel_time_seconds,
                "static_duration_seconds": self.static_duration_seconds,
                "travel_time_text": self.travel_time_text,
                "distance_meters": self.distance_meters,
                "distance_text": self.distance_text,
                "delay_seconds": self.delay_seconds,
                "traffic_condition": self.traffic_condition,
                "color": self.color,
            }),
        )];
        let endpoints = [("start", line.points().next()), ("end", line.points().last())];
        for (role, point) in endpoints {
            if let Some(point) = point {
                features.push(endpoint_feature(self, role, point));
            }
        }
        features
    }
}

fn endpoint_feature(snapshot: &RouteSnapshot, role: &str, point: Point<f64>) -> Feature {
    feature(
        geo::Geometry::Point(point),
        json!({
            "id": snapshot.id,
            "name": snapshot.name,
            "role": role,
            "travel_time_text": snapshot.travel_time_text,
        }),
    )
}

fn feature(geometry: geo::Geometry<f64>, properties: serde_json::Value) -> Feature {
    let properties: Option<JsonObject> = match properties {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    };
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::from(&geometry)),
        id: None,
        properties,
        foreign_members: None,
    }
}
