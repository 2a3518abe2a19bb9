use std::time::Duration;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::SamplingBand;
use crate::{
    model::route::{RouteConfigError, MAX_SAMPLING_INTERVAL},
    util::duration_codec,
};

/// label reported for hours not covered by any band
pub const OFF_PEAK_BAND_NAME: &str = "off_peak";

const MINUTE: u64 = 60;

/// variable interval sampling: chooses how long to wait between samples from
/// the local time of day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    #[serde(default)]
    pub bands: Vec<SamplingBand>,
    /// interval for hours outside every band
    #[serde(
        default = "default_off_peak_interval",
        with = "duration_codec::humantime_duration"
    )]
    pub default_interval: Duration,
}

fn default_off_peak_interval() -> Duration {
    Duration::from_secs(120 * MINUTE)
}

impl Default for SamplingPolicy {
    /// peak 08-11 and 17-20 every 15 minutes, inter-peak 11-17 and 20-23
    /// every 45 minutes, otherwise every 2 hours.
    fn default() -> Self {
        Self {
            bands: vec![
                SamplingBand::new("peak", &[(8, 11), (17, 20)], Duration::from_secs(15 * MINUTE)),
                SamplingBand::new(
                    "inter_peak",
                    &[(11, 17), (20, 23)],
                    Duration::from_secs(45 * MINUTE),
                ),
            ],
            default_interval: default_off_peak_interval(),
        }
    }
}

impl SamplingPolicy {
    fn band_at(&self, hour: u32) -> Option<&SamplingBand> {
        self.bands.iter().find(|b| b.contains_hour(hour))
    }

    /// sampling interval at a local time. the first band containing the hour wins.
    pub fn interval_at<T: Timelike>(&self, local_time: &T) -> Duration {
        self.band_at(local_time.hour())
            .map(|b| b.interval)
            .unwrap_or(self.default_interval)
    }

    pub fn band_name_at<T: Timelike>(&self, local_time: &T) -> &str {
        self.band_at(local_time.hour())
            .map(|b| b.name.as_str())
            .unwrap_or(OFF_PEAK_BAND_NAME)
    }

    pub fn validate(&self) -> Result<(), RouteConfigError> {
        for band in self.bands.iter() {
            band.validate()?;
        }
        if self.default_interval.is_zero() || self.default_interval > MAX_SAMPLING_INTERVAL {
            return Err(RouteConfigError::InvalidSamplingBandError(
                String::from(OFF_PEAK_BAND_NAME),
                format!(
                    "default interval {} must be greater than zero and at most {}",
                    humantime::format_duration(self.default_interval),
                    humantime::format_duration(MAX_SAMPLING_INTERVAL)
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::SamplingPolicy;
    use crate::model::schedule::SamplingBand;
    use chrono::NaiveTime;
    use std::time::Duration;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_default_policy_intervals() {
        let policy = SamplingPolicy::default();
        let peak = Duration::from_secs(15 * 60);
        let inter_peak = Duration::from_secs(45 * 60);
        let off_peak = Duration::from_secs(120 * 60);

        for hour in [8, 9, 10, 17, 18, 19] {
            assert_eq!(policy.interval_at(&at(hour, 30)), peak, "hour {hour}");
        }
        for hour in [11, 12, 16, 20, 22] {
            assert_eq!(policy.interval_at(&at(hour, 0)), inter_peak, "hour {hour}");
        }
        for hour in [23, 0, 3, 7] {
            assert_eq!(policy.interval_at(&at(hour, 59)), off_peak, "hour {hour}");
        }
    }

    #[test]
    fn test_band_boundaries_are_half_open() {
        let policy = SamplingPolicy::default();
        assert_eq!(policy.band_name_at(&at(7, 59)), "off_peak");
        assert_eq!(policy.band_name_at(&at(8, 0)), "peak");
        assert_eq!(policy.band_name_at(&at(11, 0)), "inter_peak");
        assert_eq!(policy.band_name_at(&at(23, 0)), "off_peak");
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(SamplingPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_bands() {
        let mut policy = SamplingPolicy::default();
        policy.bands.push(SamplingBand::new("backwards", &[(14, 12)], Duration::from_secs(60)));
        assert!(policy.validate().is_err());

        let mut policy = SamplingPolicy::default();
        policy.bands.push(SamplingBand::new("late", &[(20, 25)], Duration::from_secs(60)));
        assert!(policy.validate().is_err());

        let mut policy = SamplingPolicy::default();
        policy.default_interval = Duration::ZERO;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_policy() {
        let json = r#"{ "bands": [ { "name": "rush", "hours": [[7, 9]], "interval": "5m" } ] }"#;
        let policy: SamplingPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.interval_at(&at(8, 0)), Duration::from_secs(300));
        assert_eq!(policy.interval_at(&at(12, 0)), Duration::from_secs(7200));
    }
}
