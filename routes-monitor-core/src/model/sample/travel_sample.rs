use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::TrafficCondition;
use crate::model::{
    api::RouteLeg,
    keys::ApiKey,
    route::{RouteDefinition, RouteId},
};

/// one measurement of travel time and delay for a route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelSample {
    pub timestamp: DateTime<FixedOffset>,
    pub route_id: RouteId,
    pub route_name: Option<String>,
    /// travel time with traffic
    pub duration_seconds: u64,
    /// travel time without traffic
    pub static_duration_seconds: u64,
    pub delay_seconds: i64,
    pub distance_meters: u64,
    pub traffic_condition: TrafficCondition,
    pub api_key_suffix: String,
}

impl TravelSample {
    pub fn from_route_leg(
        route: &RouteDefinition,
        leg: &RouteLeg,
        timestamp: DateTime<FixedOffset>,
        key: &ApiKey,
    ) -> Self {
        Self {
            timestamp,
            route_id: route.id.clone(),
            route_name: route.name.clone(),
            duration_seconds: leg.duration_seconds,
            static_duration_seconds: leg.static_duration_seconds,
            delay_seconds: leg.delay_seconds(),
            distance_meters: leg.distance_meters,
            traffic_condition: TrafficCondition::from_speed(
                leg.distance_meters,
                leg.duration_seconds,
            ),
            api_key_suffix: key.suffix(),
        }
    }
}
