use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    model::route::{RouteConfigError, MAX_SAMPLING_INTERVAL},
    util::duration_codec,
};

/// a named set of local-hour ranges sharing one sampling interval. each range
/// is half-open, `[start, end)`, in hours 0..=24.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingBand {
    pub name: String,
    pub hours: Vec<(u32, u32)>,
    #[serde(with = "duration_codec::humantime_duration")]
    pub interval: Duration,
}

impl SamplingBand {
    pub fn new(name: &str, hours: &[(u32, u32)], interval: Duration) -> Self {
        Self {
            name: name.to_string(),
            hours: hours.to_vec(),
            interval,
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        self.hours
            .iter()
            .any(|(start, end)| *start <= hour && hour < *end)
    }

    pub fn validate(&self) -> Result<(), RouteConfigError> {
        let invalid =
            |msg: String| RouteConfigError::InvalidSamplingBandError(self.name.clone(), msg);
        if self.hours.is_empty() {
            return Err(invalid(String::from("no hour ranges given")));
        }
        for (start, end) in self.hours.iter() {
            if *end > 24 || start >= end {
                return Err(invalid(format!(
                    "hour range [{start}, {end}) must satisfy 0 <= start < end <= 24"
                )));
            }
        }
        if self.interval.is_zero() || self.interval > MAX_SAMPLING_INTERVAL {
            return Err(invalid(format!(
                "interval {} must be greater than zero and at most {}",
                humantime::format_duration(self.interval),
                humantime::format_duration(MAX_SAMPLING_INTERVAL)
            )));
        }
        Ok(())
    }
}
