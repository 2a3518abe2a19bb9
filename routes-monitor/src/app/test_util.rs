use std::{cell::Cell, collections::VecDeque, str::FromStr, sync::Mutex, time::Duration};

use chrono::{DateTime, FixedOffset, TimeDelta};
use routes_monitor_core::model::{
    api::{ComputeRoutesRequest, ComputeRoutesResponse, RoutesApi, RoutesApiError},
    keys::ApiKey,
    route::{LatLng, RouteDefinition, RouteId},
};
use serde_json::json;

use super::monitor::Clock;

/// a traffic-heavy route: 1080s with traffic, 900s without, 5.2 km
pub fn sample_response() -> serde_json::Value {
    json!({
        "routes": [
            {
                "duration": "1080s",
                "staticDuration": "900s",
                "distanceMeters": 5200,
                "polyline": {"encodedPolyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"}
            }
        ],
        "geocodingResults": {}
    })
}

pub fn route(id: &str) -> RouteDefinition {
    RouteDefinition::new(
        RouteId::from_str(id).unwrap(),
        Some(format!("Route {id}")),
        LatLng::new(41.70, 44.79),
        LatLng::new(41.67, 44.95),
    )
}

/// a call received by [`FakeRoutesApi`]
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub key: ApiKey,
    pub request: ComputeRoutesRequest,
    pub field_mask: String,
}

/// replays queued responses in order, then answers with [`sample_response`].
#[derive(Default)]
pub struct FakeRoutesApi {
    responses: Mutex<VecDeque<Result<serde_json::Value, RoutesApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeRoutesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<Result<serde_json::Value, RoutesApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RoutesApi for FakeRoutesApi {
    fn compute_routes(
        &self,
        key: &ApiKey,
        request: &ComputeRoutesRequest,
        field_mask: &str,
    ) -> Result<ComputeRoutesResponse, RoutesApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            key: key.clone(),
            request: request.clone(),
            field_mask: field_mask.to_string(),
        });
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_response()));
        next.and_then(ComputeRoutesResponse::try_from)
    }
}

/// a clock that only moves when slept
#[derive(Clone, Debug)]
pub struct ManualClock {
    pub now: DateTime<FixedOffset>,
    pub slept: Vec<Duration>,
}

impl ManualClock {
    pub fn at(rfc3339: &str) -> Self {
        Self {
            now: DateTime::parse_from_rfc3339(rfc3339).unwrap(),
            slept: vec![],
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += TimeDelta::from_std(duration).unwrap();
        self.slept.push(duration);
    }
}

/// a clock that advances by `step` every time it is read
#[derive(Debug)]
pub struct SteppingClock {
    now: Cell<DateTime<FixedOffset>>,
    step: TimeDelta,
}

impl SteppingClock {
    pub fn at(rfc3339: &str, step: TimeDelta) -> Self {
        Self {
            now: Cell::new(DateTime::parse_from_rfc3339(rfc3339).unwrap()),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now.set(self.now.get() + TimeDelta::from_std(duration).unwrap());
    }
}
