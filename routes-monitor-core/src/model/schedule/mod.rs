mod route_schedule;
mod sampling_band;
mod sampling_policy;

pub use route_schedule::{interval_for, RouteSchedule};
pub use sampling_band::SamplingBand;
pub use sampling_policy::{SamplingPolicy, OFF_PEAK_BAND_NAME};
