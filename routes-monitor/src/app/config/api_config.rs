use std::time::Duration;

use routes_monitor_core::{
    model::{
        api::constants::{
            DEFAULT_DEPARTURE_LEAD, DEFAULT_REQUEST_SPACING, DEFAULT_REQUEST_TIMEOUT,
            ROUTES_API_ENDPOINT,
        },
        keys::{KeyManager, RotationPolicy},
    },
    util::duration_codec,
};
use serde::{Deserialize, Serialize};

/// how the monitor talks to the Routes API and spends its keys
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    #[serde(with = "duration_codec::humantime_duration")]
    pub timeout: Duration,
    /// pause between consecutive requests within a cycle
    #[serde(with = "duration_codec::humantime_duration")]
    pub request_spacing: Duration,
    /// how far ahead of "now" the requested departure time is set
    #[serde(with = "duration_codec::humantime_duration")]
    pub departure_lead: Duration,
    /// monthly calls allowed per key
    pub usage_limit: u64,
    pub rotation: RotationPolicy,
    pub compute_alternative_routes: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(ROUTES_API_ENDPOINT),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            request_spacing: DEFAULT_REQUEST_SPACING,
            departure_lead: DEFAULT_DEPARTURE_LEAD,
            usage_limit: KeyManager::DEFAULT_USAGE_LIMIT,
            rotation: RotationPolicy::default(),
            compute_alternative_routes: true,
        }
    }
}
