use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// congestion classification derived from the average speed over a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficCondition {
    /// faster than 40 km/h
    Fast,
    /// 25 to 40 km/h
    Moderate,
    /// 15 to 25 km/h
    Slow,
    /// 15 km/h or less
    VerySlow,
    /// no distance or no duration reported
    Unknown,
}

impl TrafficCondition {
    pub fn from_speed(distance_meters: u64, duration_seconds: u64) -> TrafficCondition {
        match average_speed_kmh(distance_meters, duration_seconds) {
            None => TrafficCondition::Unknown,
            Some(kmh) if kmh > 40.0 => TrafficCondition::Fast,
            Some(kmh) if kmh > 25.0 => TrafficCondition::Moderate,
            Some(kmh) if kmh > 15.0 => TrafficCondition::Slow,
            Some(_) => TrafficCondition::VerySlow,
        }
    }

    /// map color used when drawing a route in this condition
    pub fn color(&self) -> &'static str {
        match self {
            TrafficCondition::Fast => "green",
            TrafficCondition::Moderate => "orange",
            TrafficCondition::Slow => "darkorange",
            TrafficCondition::VerySlow => "red",
            TrafficCondition::Unknown => "gray",
        }
    }
}

pub fn average_speed_kmh(distance_meters: u64, duration_seconds: u64) -> Option<f64> {
    if distance_meters == 0 || duration_seconds == 0 {
        None
    } else {
        Some((distance_meters as f64 / 1000.0) / (duration_seconds as f64 / 3600.0))
    }
}

impl Display for TrafficCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrafficCondition::Fast => "fast",
            TrafficCondition::Moderate => "moderate",
            TrafficCondition::Slow => "slow",
            TrafficCondition::VerySlow => "very_slow",
            TrafficCondition::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}
